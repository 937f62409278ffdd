//! Kernel density estimation for generation interval statistics
//!
//! Smooths per-population samples (e.g. ancestry segment lengths) into
//! density curves over a shared evaluation grid, ready for plotting.

pub mod api;
pub mod core;
pub mod data;
pub mod estimator;
pub mod kernel;
pub mod persistence;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::{DensityPlot, DensityReport, EstimatorConfig};
pub use crate::core::types::*;
pub use crate::core::{DensityError, Result};
pub use crate::data::GroupedSamples;
pub use crate::estimator::{kernel_density_estimator, KernelDensityEstimator};
pub use crate::kernel::{epanechnikov, EpanechnikovKernel, Kernel};
pub use crate::utils::bandwidth::BandwidthRule;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
