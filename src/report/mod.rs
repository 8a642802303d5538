//! Reporting utilities: text cards and per-window summaries.

pub mod format;

pub use format::*;
