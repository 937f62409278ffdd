//! Epanechnikov kernel implementation
//!
//! The Epanechnikov kernel is defined as: K(u) = 3/4 * (1 - (u/h)²) / h for |u/h| <= 1
//! and 0 otherwise, where h is the bandwidth.

use crate::core::{DensityError, Result};
use crate::kernel::Kernel;

/// Epanechnikov kernel: quadratic weight with finite support `[-h, h]`
///
/// The kernel integrates to one for any positive bandwidth, so averaging it
/// over a sample yields a proper probability density. Its finite support means
/// observations further than one bandwidth from a query point contribute
/// nothing to the density there.
///
/// - Small bandwidth: narrow bumps, noisy curve
/// - Large bandwidth: wide bumps, smooth curve that may hide modes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpanechnikovKernel {
    bandwidth: f64,
}

impl EpanechnikovKernel {
    /// Create a new Epanechnikov kernel
    ///
    /// # Arguments
    /// * `bandwidth` - The smoothing radius (must be positive and finite)
    ///
    /// # Errors
    /// Returns `DensityError::InvalidParameter` if the bandwidth is zero,
    /// negative, NaN or infinite.
    pub fn new(bandwidth: f64) -> Result<Self> {
        validate_bandwidth(bandwidth)?;
        Ok(Self { bandwidth })
    }

    /// Get the bandwidth parameter
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Unscaled distance interval outside which the weight is zero
    pub fn support(&self) -> (f64, f64) {
        (-self.bandwidth, self.bandwidth)
    }
}

impl Kernel for EpanechnikovKernel {
    fn weight(&self, u: f64) -> f64 {
        epanechnikov_weight(u, self.bandwidth)
    }
}

/// Closure form of the Epanechnikov kernel
///
/// Captures the bandwidth once and returns a stateless weighting function,
/// which also implements [`Kernel`] through the closure blanket impl.
pub fn epanechnikov(bandwidth: f64) -> Result<impl Fn(f64) -> f64 + Copy + Send + Sync> {
    validate_bandwidth(bandwidth)?;
    Ok(move |u: f64| epanechnikov_weight(u, bandwidth))
}

fn validate_bandwidth(bandwidth: f64) -> Result<()> {
    if bandwidth.is_finite() && bandwidth > 0.0 {
        Ok(())
    } else {
        Err(DensityError::InvalidParameter(format!(
            "Bandwidth must be positive and finite, got: {bandwidth}"
        )))
    }
}

/// Non-finite distances have no defined weight and yield NaN
#[inline]
fn epanechnikov_weight(u: f64, bandwidth: f64) -> f64 {
    if !u.is_finite() {
        return f64::NAN;
    }

    let scaled = u / bandwidth;
    if scaled.abs() <= 1.0 {
        0.75 * (1.0 - scaled * scaled) / bandwidth
    } else {
        0.0
    }
}
