//! Export computed cards to JSON.
//!
//! One file per run: the anchor date, and for every card either its metrics and
//! chart windows or the error that replaced them.

use std::fs::File;
use std::path::Path;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::app::pipeline::SeriesOutcome;
use crate::domain::{MetricResult, SeriesKind};
use crate::error::AppError;
use crate::metrics::ChartWindow;

#[derive(Debug, Serialize)]
pub struct ExportFile<'a> {
    pub tool: &'static str,
    pub generated: String,
    pub anchor: NaiveDate,
    pub cards: Vec<ExportCard<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ExportCard<'a> {
    pub series_id: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub kind: SeriesKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<&'a MetricResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub windows: Vec<ChartWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> ExportCard<'a> {
    fn from_outcome(outcome: &'a SeriesOutcome) -> Self {
        let config = &outcome.config;
        let (metrics, error) = match &outcome.result {
            Ok(m) => (Some(m), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            series_id: config.series_id,
            name: config.name,
            unit: config.unit,
            kind: config.kind,
            metrics,
            windows: outcome.windows(),
            error,
        }
    }
}

/// Build the export document for a set of outcomes.
pub fn build_export(anchor: NaiveDate, outcomes: &[SeriesOutcome]) -> ExportFile<'_> {
    ExportFile {
        tool: "econ",
        generated: Local::now().to_rfc3339(),
        anchor,
        cards: outcomes.iter().map(ExportCard::from_outcome).collect(),
    }
}

/// Write all cards (successful and failed) to a pretty-printed JSON file.
pub fn write_cards_json(path: &Path, anchor: NaiveDate, outcomes: &[SeriesOutcome]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &build_export(anchor, outcomes))
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}
