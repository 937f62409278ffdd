//! Data loading for density estimation
//!
//! Observations are grouped by population or ancestry label so that one
//! density curve can be drawn per group.

pub mod csv;
pub mod samples;

pub use self::csv::*;
pub use self::samples::*;
