//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and filtered observations (`RawObservation`, `Observation`)
//! - derived card metrics (`MetricResult`, `DataGaps`)
//! - static series descriptors (`SeriesConfig`, `SeriesKind`)
//! - calendar helpers for API/display formats and look-back windows (`dates`)

pub mod dates;
pub mod types;

pub use dates::*;
pub use types::*;
