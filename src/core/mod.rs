//! Core types and errors for density estimation

pub mod error;
pub mod types;

pub use self::error::*;
pub use self::types::*;
