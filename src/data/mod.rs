//! Upstream data: the FRED client and the static series catalog.

pub mod catalog;
pub mod fred;

pub use catalog::*;
pub use fred::*;
