//! Calendar helpers.
//!
//! Everything here works on `NaiveDate`, so there is no timezone to drift
//! through: `2024-01-02` from FRED stays `2024-01-02` on every machine.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::error::SeriesError;

/// Extra days fetched before the look-back start so weekends and holidays at
/// the edge of the window still leave data to chart.
pub const WINDOW_BUFFER_DAYS: i64 = 30;

/// How far back the latest-date lookup scans.
pub const LATEST_LOOKUP_DAYS: i64 = 30;

/// Inclusive `[start, end]` date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SeriesError> {
        if start > end {
            return Err(SeriesError::InvalidRange {
                start: format_date_for_api(start),
                end: format_date_for_api(end),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Parse a FRED `YYYY-MM-DD` date.
pub fn parse_local_date(raw: &str) -> Result<NaiveDate, SeriesError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| SeriesError::parse(format!("invalid date '{raw}': {e}")))
}

/// `YYYY-MM-DD`, as the API expects it.
pub fn format_date_for_api(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `MM/DD/YYYY`, as cards display it.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// The same calendar day one year earlier.
///
/// Feb 29 has no counterpart in the prior year and rolls forward to Mar 1.
pub fn one_year_before(date: NaiveDate) -> NaiveDate {
    let year = date.year() - 1;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(date - Duration::days(365))
}

/// Fetch range for the current period: look-back plus a buffer, ending at `anchor`.
pub fn current_window(anchor: NaiveDate, lookback_days: i64) -> DateRange {
    let start = anchor - Duration::days(lookback_days.max(0) + WINDOW_BUFFER_DAYS);
    DateRange { start, end: anchor }
}

/// Fetch range for the prior-year comparison: `span_days` ending on the anniversary.
///
/// The span must cover at least one reporting period of the series, or an
/// anniversary between two releases finds nothing.
pub fn prior_year_window(anchor: NaiveDate, span_days: i64) -> DateRange {
    let end = one_year_before(anchor);
    let start = end - Duration::days(span_days.max(0));
    DateRange { start, end }
}

/// Range scanned when looking for the most recently published observation.
pub fn latest_lookup_window(today: NaiveDate) -> DateRange {
    DateRange {
        start: today - Duration::days(LATEST_LOOKUP_DAYS),
        end: today,
    }
}

/// Chart title for a trailing window length.
pub fn days_label(days: i64) -> String {
    if days < 365 {
        return format!("{days} Days");
    }
    let years = (days as f64 / 365.0).round() as i64;
    if years == 1 {
        "1 Year".to_string()
    } else {
        format!("{years} Years")
    }
}
