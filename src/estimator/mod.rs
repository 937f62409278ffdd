//! Kernel density estimator
//!
//! The estimator is configured in two stages: the kernel and the evaluation
//! grid are fixed once, then the estimator is applied to any number of
//! samples. A multi-series plot therefore shares one kernel and one grid
//! across all of its groups.
//!
//! For every grid point `x` the density is the mean kernel weight
//!
//! ```text
//! f(x) = (1/n) * Σᵢ K(x - sᵢ)
//! ```
//!
//! and an empty sample yields a density of zero everywhere.

use crate::core::{DensityCurve, DensityPoint, DensitySeries, EvaluationGrid};
use crate::data::GroupedSamples;
use crate::kernel::Kernel;

/// Kernel density estimator over a fixed evaluation grid
#[derive(Debug, Clone)]
pub struct KernelDensityEstimator<K: Kernel> {
    kernel: K,
    grid: EvaluationGrid,
}

impl<K: Kernel> KernelDensityEstimator<K> {
    /// Create a new estimator from a kernel and an evaluation grid
    pub fn new(kernel: K, grid: impl Into<EvaluationGrid>) -> Self {
        Self {
            kernel,
            grid: grid.into(),
        }
    }

    /// Get the kernel
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Get the evaluation grid
    pub fn grid(&self) -> &EvaluationGrid {
        &self.grid
    }

    /// Estimate the density of `sample` at every grid point
    ///
    /// The result has one point per grid point in grid order. Runs in
    /// O(|grid| × |sample|) kernel evaluations. Non-finite observations or
    /// grid points are not filtered: the affected densities come out NaN.
    pub fn evaluate(&self, sample: &[f64]) -> DensityCurve {
        let points = self
            .grid
            .points()
            .iter()
            .map(|&x| DensityPoint::new(x, self.density_at(x, sample)))
            .collect();

        DensityCurve::new(points)
    }

    /// Estimate one density curve per group, preserving group order
    pub fn evaluate_groups(&self, groups: &GroupedSamples) -> Vec<DensitySeries> {
        groups
            .iter()
            .map(|(group, sample)| DensitySeries::new(group, sample.len(), self.evaluate(sample)))
            .collect()
    }

    /// Mean kernel weight at `x`, zero for an empty sample
    fn density_at(&self, x: f64, sample: &[f64]) -> f64 {
        if sample.is_empty() {
            return 0.0;
        }

        let total: f64 = sample.iter().map(|&s| self.kernel.weight(x - s)).sum();
        total / sample.len() as f64
    }
}

/// Closure form of the two-stage estimator
///
/// Fixes `kernel` and `grid` and returns a function that maps a sample to its
/// density curve. Each call is independent of every other call.
pub fn kernel_density_estimator<K: Kernel>(
    kernel: K,
    grid: impl Into<EvaluationGrid>,
) -> impl Fn(&[f64]) -> DensityCurve {
    let estimator = KernelDensityEstimator::new(kernel, grid);
    move |sample: &[f64]| estimator.evaluate(sample)
}
