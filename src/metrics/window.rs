//! Trailing-window slicing for charts.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::{Observation, days_label};

/// Observations dated within `[as_of - days, as_of]` (inclusive), in input order.
///
/// `as_of` defaults to the date of the last observation, which assumes an
/// ascending input.
pub fn filter_window(observations: &[Observation], days: i64, as_of: Option<NaiveDate>) -> Vec<Observation> {
    let Some(last) = observations.last() else {
        return Vec::new();
    };
    let latest = as_of.unwrap_or(last.date);
    let cutoff = latest - Duration::days(days);

    observations
        .iter()
        .filter(|o| o.date >= cutoff && o.date <= latest)
        .copied()
        .collect()
}

/// One chart's worth of data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartWindow {
    pub days: i64,
    pub label: String,
    pub points: Vec<Observation>,
}

impl ChartWindow {
    pub fn summary(&self) -> Option<WindowSummary> {
        WindowSummary::of(&self.points)
    }
}

/// Slice `observations` into one window per entry of `days`.
pub fn chart_windows(observations: &[Observation], days: &[i64], as_of: Option<NaiveDate>) -> Vec<ChartWindow> {
    days.iter()
        .map(|&d| ChartWindow {
            days: d,
            label: days_label(d),
            points: filter_window(observations, d, as_of),
        })
        .collect()
}

/// Chart header numbers: first value, last value, and the move between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowSummary {
    pub first: f64,
    pub last: f64,
    pub change: f64,
    pub min: f64,
    pub max: f64,
}

impl WindowSummary {
    pub fn of(points: &[Observation]) -> Option<Self> {
        let first = points.first()?.value;
        let last = points.last()?.value;
        let (min, max) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), o| (lo.min(o.value), hi.max(o.value)));
        Some(Self {
            first,
            last,
            change: last - first,
            min,
            max,
        })
    }
}
