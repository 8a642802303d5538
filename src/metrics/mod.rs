//! Pure data shaping: raw observations in, card metrics and chart windows out.
//!
//! Nothing here performs I/O, so all of it is unit-testable with literals.

pub mod derive;
pub mod window;

pub use derive::*;
pub use window::*;
