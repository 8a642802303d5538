//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the derive/window code
//! - rendered by both the CLI report and the TUI
//! - exported to JSON

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Marker FRED uses for a date with no reported value.
pub const MISSING_VALUE: &str = ".";

/// Look-back (days) used for exchange-rate cards.
pub const EXCHANGE_RATE_LOOKBACK_DAYS: i64 = 150;

/// Look-back (days) used for indicator cards.
pub const INDICATOR_LOOKBACK_DAYS: i64 = 365;

/// Prior-year fetch span (days) for daily exchange rates.
pub const EXCHANGE_RATE_PRIOR_SPAN_DAYS: i64 = 14;

/// Prior-year fetch span (days) for indicators; covers one monthly release.
pub const INDICATOR_PRIOR_SPAN_DAYS: i64 = 45;

/// Chart windows rendered on an exchange-rate card.
pub const EXCHANGE_RATE_WINDOWS: [i64; 5] = [14, 30, 60, 90, 120];

/// Chart windows rendered on an indicator card.
pub const INDICATOR_WINDOWS: [i64; 2] = [90, 180];

/// One observation exactly as the upstream JSON carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawObservation {
    pub date: String,
    pub value: String,
}

impl RawObservation {
    pub fn new(date: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            value: value.into(),
        }
    }

    /// `true` when the upstream reported no value for this date.
    pub fn is_missing(&self) -> bool {
        let trimmed = self.value.trim();
        trimmed == MISSING_VALUE || trimmed.is_empty()
    }
}

/// A parsed, non-missing observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

/// Which side of a card fell back to a zero default.
///
/// Only ever set under `MissingDataPolicy::ZeroDefault`; the strict policy
/// reports `NoData` instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataGaps {
    pub current_missing: bool,
    pub prior_year_missing: bool,
}

impl DataGaps {
    pub fn any(&self) -> bool {
        self.current_missing || self.prior_year_missing
    }
}

/// What to do when a fetch succeeds but yields no usable observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingDataPolicy {
    /// Fail the series with `NoData`.
    #[default]
    Strict,
    /// Substitute `0` and flag the gap in `DataGaps`.
    ZeroDefault,
}

/// Point-in-time metrics for one series plus the observations behind its charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    pub series_id: String,
    pub current: f64,
    pub prior_year: f64,
    pub yoy_change: f64,
    /// `None` when the prior-year value is zero.
    pub yoy_percent: Option<f64>,
    /// `MM/DD/YYYY` of the last valid current-period observation.
    pub data_as_of: String,
    pub data_as_of_date: NaiveDate,
    /// Current-period observations, ascending by date.
    pub observations: Vec<Observation>,
    pub gaps: DataGaps,
}

/// Card family; drives look-back, chart windows, and number formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    ExchangeRate,
    Indicator,
}

impl SeriesKind {
    pub fn lookback_days(self) -> i64 {
        match self {
            SeriesKind::ExchangeRate => EXCHANGE_RATE_LOOKBACK_DAYS,
            SeriesKind::Indicator => INDICATOR_LOOKBACK_DAYS,
        }
    }

    /// Days fetched before the one-year anniversary for the prior-year value.
    pub fn prior_span_days(self) -> i64 {
        match self {
            SeriesKind::ExchangeRate => EXCHANGE_RATE_PRIOR_SPAN_DAYS,
            SeriesKind::Indicator => INDICATOR_PRIOR_SPAN_DAYS,
        }
    }

    pub fn chart_windows(self) -> &'static [i64] {
        match self {
            SeriesKind::ExchangeRate => &EXCHANGE_RATE_WINDOWS,
            SeriesKind::Indicator => &INDICATOR_WINDOWS,
        }
    }

    /// Decimal places used for the YoY percentage.
    pub fn percent_decimals(self) -> usize {
        match self {
            SeriesKind::ExchangeRate => 2,
            SeriesKind::Indicator => 1,
        }
    }
}

/// Static description of a tracked series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesConfig {
    pub series_id: &'static str,
    pub name: &'static str,
    pub short_name: &'static str,
    pub description: &'static str,
    pub unit: &'static str,
    pub decimals: usize,
    pub source_name: &'static str,
    pub source_url: &'static str,
    /// A decrease is the favorable direction (e.g. unemployment, mortgage rates).
    pub invert: bool,
    pub kind: SeriesKind,
}

impl SeriesConfig {
    /// Whether a change in this direction is good news for the reader.
    pub fn is_favorable(&self, change: f64) -> bool {
        if self.invert { change <= 0.0 } else { change >= 0.0 }
    }

    pub fn request(&self, anchor: NaiveDate) -> SeriesRequest {
        SeriesRequest {
            series_id: self.series_id.to_string(),
            lookback_days: self.kind.lookback_days(),
            prior_span_days: self.kind.prior_span_days(),
            anchor,
        }
    }
}

/// Inputs of one pipeline run: which series, how far back, anchored where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    pub series_id: String,
    pub lookback_days: i64,
    pub prior_span_days: i64,
    pub anchor: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_marker_detection() {
        assert!(RawObservation::new("2024-01-01", ".").is_missing());
        assert!(RawObservation::new("2024-01-01", " . ").is_missing());
        assert!(RawObservation::new("2024-01-01", "").is_missing());
        assert!(!RawObservation::new("2024-01-01", "0").is_missing());
    }

    #[test]
    fn favorable_direction_respects_invert() {
        let mut config = crate::data::catalog::EXCHANGE_RATES[0].clone();
        assert!(config.is_favorable(0.1));
        assert!(!config.is_favorable(-0.1));

        config.invert = true;
        assert!(config.is_favorable(-0.1));
        assert!(config.is_favorable(0.0));
        assert!(!config.is_favorable(0.1));
    }
}
