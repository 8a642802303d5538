//! Formatted terminal output for metric cards.
//!
//! We keep formatting code in one place so:
//! - the derive/window code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use chrono::NaiveDate;

use crate::app::pipeline::SeriesOutcome;
use crate::domain::{MetricResult, SeriesConfig, SeriesKind, format_display_date};
use crate::metrics::ChartWindow;
use crate::plot::render_window_plot;

/// Size of the optional per-window ASCII plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotSize {
    pub width: usize,
    pub height: usize,
}

pub fn format_value(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Signed change, e.g. `+0.0600` / `-1.2`.
pub fn format_change(value: f64, decimals: usize) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{value:.decimals$}")
}

/// Signed percentage, or `N/A` when the prior-year base was zero.
pub fn format_percent(pct: Option<f64>, decimals: usize) -> String {
    match pct {
        Some(p) => {
            let sign = if p >= 0.0 { "+" } else { "" };
            format!("{sign}{p:.decimals$}%")
        }
        None => "N/A".to_string(),
    }
}

/// Header line shown above a tab's cards.
pub fn format_tab_header(title: &str, anchor: NaiveDate, latest: Option<NaiveDate>) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {title} ===\n"));
    out.push_str(&format!("Point in time: {}", format_display_date(anchor)));
    if let Some(latest) = latest {
        out.push_str(&format!(" (latest available: {})", format_display_date(latest)));
    }
    out.push('\n');
    out
}

/// Render one card: metrics, attribution, and per-window summaries.
///
/// Failed series render their error in place of metrics and charts.
pub fn format_card(outcome: &SeriesOutcome, plot: Option<PlotSize>) -> String {
    let config = &outcome.config;
    let mut out = String::new();
    out.push_str(&format!("--- {} ({}) ---\n", config.name, config.series_id));

    let metric = match &outcome.result {
        Ok(metric) => metric,
        Err(err) => {
            out.push_str(&format!("Error: {err}\n"));
            return out;
        }
    };

    out.push_str(&format_metrics(config, metric));
    out.push_str(&format!("Source: {} | {}\n", config.source_name, config.source_url));
    if config.kind == SeriesKind::ExchangeRate {
        out.push_str("Note: Prior year comparison reflects the closest trading day with available data.\n");
    }

    let windows = outcome.windows();
    out.push('\n');
    out.push_str(&format_windows(&windows, config.decimals));

    if let Some(size) = plot {
        for window in &windows {
            out.push('\n');
            out.push_str(&render_window_plot(window, config.decimals, size.width, size.height));
        }
    }

    out
}

fn format_metrics(config: &SeriesConfig, metric: &MetricResult) -> String {
    let decimals = config.decimals;
    let favorable = if config.is_favorable(metric.yoy_change) {
        "favorable"
    } else {
        "unfavorable"
    };
    let current_label = match config.kind {
        SeriesKind::ExchangeRate => "Current Rate".to_string(),
        SeriesKind::Indicator => format!("Current ({})", config.unit),
    };

    let mut out = String::new();
    out.push_str(&format!("As of: {}\n", metric.data_as_of));
    out.push_str(&format!(
        "{:<14} {:>12}{}\n",
        current_label,
        format_value(metric.current, decimals),
        gap_marker(metric.gaps.current_missing),
    ));
    out.push_str(&format!(
        "{:<14} {:>12}{}\n",
        "Prior Year",
        format_value(metric.prior_year, decimals),
        gap_marker(metric.gaps.prior_year_missing),
    ));
    out.push_str(&format!(
        "{:<14} {:>12} ({favorable})\n",
        "YOY Change",
        format_change(metric.yoy_change, decimals),
    ));
    out.push_str(&format!(
        "{:<14} {:>12}\n",
        "YOY %",
        format_percent(metric.yoy_percent, config.kind.percent_decimals()),
    ));
    out
}

fn gap_marker(missing: bool) -> &'static str {
    if missing { "  (no data, shown as 0)" } else { "" }
}

/// One line per chart window: `label  first -> last  (change)`.
pub fn format_windows(windows: &[ChartWindow], decimals: usize) -> String {
    let mut out = String::new();
    for window in windows {
        match window.summary() {
            Some(s) => out.push_str(&format!(
                "{:<10} {:>12} -> {:<12} ({}) n={}\n",
                window.label,
                format_value(s.first, decimals),
                format_value(s.last, decimals),
                format_change(s.change, decimals),
                window.points.len(),
            )),
            None => out.push_str(&format!("{:<10} No data available\n", window.label)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::{EXCHANGE_RATES, RV_INDICATORS};
    use crate::domain::{DataGaps, Observation};
    use crate::error::SeriesError;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn metric(current: f64, prior_year: f64) -> MetricResult {
        MetricResult {
            series_id: "DEXCAUS".to_string(),
            current,
            prior_year,
            yoy_change: current - prior_year,
            yoy_percent: crate::metrics::yoy_percent(current, prior_year),
            data_as_of: "01/02/2024".to_string(),
            data_as_of_date: d(2024, 1, 2),
            observations: vec![
                Observation { date: d(2024, 1, 1), value: 1.30 },
                Observation { date: d(2024, 1, 2), value: current },
            ],
            gaps: DataGaps::default(),
        }
    }

    #[test]
    fn number_formats() {
        assert_eq!(format_value(1.31, 4), "1.3100");
        assert_eq!(format_change(0.06, 4), "+0.0600");
        assert_eq!(format_change(-0.06, 4), "-0.0600");
        assert_eq!(format_percent(Some(4.8), 2), "+4.80%");
        assert_eq!(format_percent(Some(-1.25), 1), "-1.2%");
        assert_eq!(format_percent(None, 2), "N/A");
    }

    #[test]
    fn exchange_rate_card_layout() {
        let outcome = SeriesOutcome {
            config: EXCHANGE_RATES[0].clone(),
            anchor: d(2024, 1, 2),
            result: Ok(metric(1.31, 1.25)),
        };
        let txt = format_card(&outcome, None);

        assert!(txt.starts_with("--- CAD - USD Exchange Rates (DEXCAUS) ---\n"));
        assert!(txt.contains("As of: 01/02/2024\n"));
        assert!(txt.contains("Current Rate         1.3100\n"));
        assert!(txt.contains("Prior Year           1.2500\n"));
        assert!(txt.contains("+0.0600 (favorable)"));
        assert!(txt.contains("+4.80%"));
        assert!(txt.contains("closest trading day"));
        assert!(txt.contains("14 Days"));
        assert!(txt.contains("120 Days"));
    }

    #[test]
    fn indicator_card_uses_unit_and_invert() {
        let config = RV_INDICATORS
            .iter()
            .find(|c| c.series_id == "UNRATE")
            .unwrap()
            .clone();
        let outcome = SeriesOutcome {
            config,
            anchor: d(2024, 1, 2),
            result: Ok(metric(4.0, 3.5)),
        };
        let txt = format_card(&outcome, None);
        assert!(txt.contains("Current (%)"));
        assert!(txt.contains("+0.5 (unfavorable)"));
        assert!(txt.contains("+14.3%"));
        assert!(!txt.contains("closest trading day"));
        assert!(txt.contains("90 Days"));
        assert!(txt.contains("180 Days"));
    }

    #[test]
    fn failed_card_shows_inline_error() {
        let outcome = SeriesOutcome {
            config: EXCHANGE_RATES[1].clone(),
            anchor: d(2024, 1, 2),
            result: Err(SeriesError::fetch("DEXUSEU", Some(500), "Internal Server Error")),
        };
        let txt = format_card(&outcome, None);
        assert!(txt.contains("Error: FRED request for DEXUSEU failed with status 500"));
        assert!(!txt.contains("As of"));
    }

    #[test]
    fn zero_defaults_are_marked() {
        let mut m = metric(1.31, 0.0);
        m.gaps.prior_year_missing = true;
        let outcome = SeriesOutcome {
            config: EXCHANGE_RATES[0].clone(),
            anchor: d(2024, 1, 2),
            result: Ok(m),
        };
        let txt = format_card(&outcome, None);
        assert!(txt.contains("0.0000  (no data, shown as 0)"));
        assert!(txt.contains("N/A"));
    }

    #[test]
    fn plots_are_appended_per_window() {
        let outcome = SeriesOutcome {
            config: EXCHANGE_RATES[0].clone(),
            anchor: d(2024, 1, 2),
            result: Ok(metric(1.31, 1.25)),
        };
        let txt = format_card(&outcome, Some(PlotSize { width: 20, height: 4 }));
        assert!(txt.contains("14 Days: 01/01/2024 .. 01/02/2024"));
        assert_eq!(txt.matches(" .. ").count(), 5);
    }

    #[test]
    fn tab_header_mentions_latest_date() {
        let txt = format_tab_header("Currency Exchange Rates", d(2024, 1, 2), Some(d(2024, 1, 3)));
        assert_eq!(
            txt,
            "=== Currency Exchange Rates ===\nPoint in time: 01/02/2024 (latest available: 01/03/2024)\n"
        );
    }
}
