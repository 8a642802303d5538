//! Shared "fetch -> derive" pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! current + prior-year fetch (joined) -> metric derivation -> per-series outcome
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::data::ObservationSource;
use crate::domain::{
    MetricResult, MissingDataPolicy, SeriesConfig, SeriesRequest, current_window, latest_lookup_window,
    parse_local_date, prior_year_window,
};
use crate::error::SeriesError;
use crate::metrics::{ChartWindow, chart_windows, derive_metric};

/// Outcome of one series inside a fan-out. Failures stay local to their card.
#[derive(Debug, Clone)]
pub struct SeriesOutcome {
    pub config: SeriesConfig,
    pub anchor: NaiveDate,
    pub result: Result<MetricResult, SeriesError>,
}

impl SeriesOutcome {
    /// Chart windows for this card, anchored at the selected date.
    pub fn windows(&self) -> Vec<ChartWindow> {
        match &self.result {
            Ok(metric) => chart_windows(&metric.observations, self.config.kind.chart_windows(), Some(self.anchor)),
            Err(_) => Vec::new(),
        }
    }
}

/// Fetch both windows for one series in parallel and derive its metrics.
///
/// The join is all-or-nothing: if either fetch fails, the series fails with
/// that fetch's error. An empty-but-successful fetch is handled by `policy`
/// instead, so the two conditions never blur together.
pub fn run_series(
    source: &dyn ObservationSource,
    request: &SeriesRequest,
    policy: MissingDataPolicy,
    today: NaiveDate,
) -> Result<MetricResult, SeriesError> {
    let current_range = current_window(request.anchor, request.lookback_days);
    let prior_range = prior_year_window(request.anchor, request.prior_span_days);
    let id = request.series_id.as_str();

    let (current, prior) = rayon::join(
        || source.fetch_series(id, current_range),
        || source.fetch_series(id, prior_range),
    );
    let current = current?;
    let prior = prior?;

    derive_metric(id, &current, &prior, policy, today)
}

/// Run every series in `configs` concurrently and collect each outcome.
///
/// Best-effort barrier: all pipelines complete, each success or failure is
/// tracked on its own, and the output keeps catalog order.
pub fn run_catalog(
    source: &dyn ObservationSource,
    configs: &[SeriesConfig],
    anchor: NaiveDate,
    policy: MissingDataPolicy,
    today: NaiveDate,
) -> Vec<SeriesOutcome> {
    let outcomes: Vec<SeriesOutcome> = configs
        .par_iter()
        .map(|config| {
            let request = config.request(anchor);
            let result = run_series(source, &request, policy, today);
            if let Err(err) = &result {
                warn!(series_id = config.series_id, error = %err, "series failed");
            }
            SeriesOutcome {
                config: config.clone(),
                anchor,
                result,
            }
        })
        .collect();

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!(anchor = %anchor, total = outcomes.len(), failed, "catalog fetch complete");
    outcomes
}

/// Most recent date with a published (non-missing) value in the last 30 days.
pub fn resolve_latest_date(
    source: &dyn ObservationSource,
    series_id: &str,
    today: NaiveDate,
) -> Result<NaiveDate, SeriesError> {
    let raw = source.fetch_series(series_id, latest_lookup_window(today))?;

    let mut latest: Option<NaiveDate> = None;
    for obs in raw.iter().filter(|o| !o.is_missing()) {
        let date = parse_local_date(&obs.date)?;
        latest = Some(latest.map_or(date, |cur| cur.max(date)));
    }

    latest.ok_or_else(|| SeriesError::no_data(series_id, "no published observations in the last 30 days"))
}

/// `resolve_latest_date`, falling back to `today` when nothing is available.
pub fn latest_date_or_today(source: &dyn ObservationSource, series_id: &str, today: NaiveDate) -> NaiveDate {
    match resolve_latest_date(source, series_id, today) {
        Ok(date) => date,
        Err(err) => {
            warn!(series_id, error = %err, "falling back to today's date");
            today
        }
    }
}
