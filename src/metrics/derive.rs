//! Year-over-year metric derivation.

use chrono::NaiveDate;

use crate::domain::{
    DataGaps, MetricResult, MissingDataPolicy, Observation, RawObservation, format_display_date,
    parse_local_date,
};
use crate::error::SeriesError;

/// Drop missing-marker entries and parse the remainder.
///
/// A non-missing value that does not parse to a finite number is a `Parse`
/// error rather than silently skipped.
pub fn parse_observations(raw: &[RawObservation]) -> Result<Vec<Observation>, SeriesError> {
    let mut out = Vec::with_capacity(raw.len());
    for obs in raw {
        if obs.is_missing() {
            continue;
        }
        let date = parse_local_date(&obs.date)?;
        let value = parse_value(&obs.value)
            .ok_or_else(|| SeriesError::parse(format!("non-numeric value '{}' on {}", obs.value, obs.date)))?;
        out.push(Observation { date, value });
    }
    Ok(out)
}

fn parse_value(raw: &str) -> Option<f64> {
    let v = raw.trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// Percentage change, or `None` when the base is zero.
pub fn yoy_percent(current: f64, prior_year: f64) -> Option<f64> {
    if prior_year == 0.0 {
        return None;
    }
    let pct = (current - prior_year) / prior_year * 100.0;
    pct.is_finite().then_some(pct)
}

/// Build the card metrics for `series_id` from its two fetch windows.
///
/// - current: latest valid observation of the current window
/// - prior year: latest valid observation at or before the one-year anchor
///   (the prior window ends on the anniversary, so this is the closest earlier
///   reporting day when the anniversary itself has no data)
///
/// `today` is only used as the as-of fallback when the current window is empty
/// under `MissingDataPolicy::ZeroDefault`.
pub fn derive_metric(
    series_id: &str,
    current_raw: &[RawObservation],
    prior_raw: &[RawObservation],
    policy: MissingDataPolicy,
    today: NaiveDate,
) -> Result<MetricResult, SeriesError> {
    let mut observations = parse_observations(current_raw)?;
    observations.sort_by_key(|o| o.date);

    let mut prior = parse_observations(prior_raw)?;
    prior.sort_by(|a, b| b.date.cmp(&a.date));

    let mut gaps = DataGaps::default();

    let (current, as_of) = match observations.last() {
        Some(last) => (last.value, last.date),
        None => match policy {
            MissingDataPolicy::Strict => {
                return Err(SeriesError::no_data(
                    series_id,
                    "no valid observations in the current window",
                ));
            }
            MissingDataPolicy::ZeroDefault => {
                gaps.current_missing = true;
                (0.0, today)
            }
        },
    };

    let prior_year = match prior.first() {
        Some(first) => first.value,
        None => match policy {
            MissingDataPolicy::Strict => {
                return Err(SeriesError::no_data(
                    series_id,
                    "no valid observations in the prior-year window",
                ));
            }
            MissingDataPolicy::ZeroDefault => {
                gaps.prior_year_missing = true;
                0.0
            }
        },
    };

    Ok(MetricResult {
        series_id: series_id.to_string(),
        current,
        prior_year,
        yoy_change: current - prior_year,
        yoy_percent: yoy_percent(current, prior_year),
        data_as_of: format_display_date(as_of),
        data_as_of_date: as_of,
        observations,
        gaps,
    })
}
