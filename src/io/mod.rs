//! Input/output helpers.
//!
//! - card exports (JSON) (`export`)

pub mod export;

pub use export::*;
