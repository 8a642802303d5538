//! `econ-dash` library crate.
//!
//! FRED-backed economic dashboard: exchange-rate and RV indicator cards with
//! year-over-year metrics and trailing chart windows. The `econ` binary only
//! calls `app::run`.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod metrics;
pub mod plot;
pub mod report;
pub mod tui;
