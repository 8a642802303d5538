//! Terminal plotting helpers for the CLI reports.

pub mod ascii;

pub use ascii::*;
