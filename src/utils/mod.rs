//! Utility functions for density estimation

use crate::core::{DensityError, EvaluationGrid, Result};
use crate::data::GroupedSamples;

/// Summary statistics of a sample
pub mod stats {
    /// Statistics for a single sample
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct SampleStats {
        pub count: usize,
        pub min: f64,
        pub max: f64,
        pub mean: f64,
        /// Sample standard deviation (n - 1 denominator, 0 for fewer than two values)
        pub std: f64,
    }

    impl SampleStats {
        /// Compute statistics, `None` for an empty sample
        pub fn from_sample(sample: &[f64]) -> Option<Self> {
            if sample.is_empty() {
                return None;
            }

            let count = sample.len();
            let min = sample.iter().fold(f64::INFINITY, |a, &b| a.min(b));
            let max = sample.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
            let mean = sample.iter().sum::<f64>() / count as f64;

            let variance = if count > 1 {
                sample.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (count - 1) as f64
            } else {
                0.0
            };

            Some(Self {
                count,
                min,
                max,
                mean,
                std: variance.sqrt(),
            })
        }

        /// Width of the observed range
        pub fn range(&self) -> f64 {
            self.max - self.min
        }
    }

    /// Linear-interpolated quantile of an ascending sorted sample
    pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
        if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
            return None;
        }

        let pos = q * (sorted.len() - 1) as f64;
        let lower = pos.floor() as usize;
        let upper = pos.ceil() as usize;
        let frac = pos - lower as f64;

        Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
    }

    /// Interquartile range (Q3 - Q1)
    pub fn interquartile_range(sample: &[f64]) -> Option<f64> {
        let mut sorted = sample.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let q1 = quantile_sorted(&sorted, 0.25)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        Some(q3 - q1)
    }
}

/// Data-driven bandwidth selection
pub mod bandwidth {
    use super::stats::{interquartile_range, SampleStats};
    use crate::core::{DensityError, Result};
    use serde::{Deserialize, Serialize};

    /// Bandwidth used when a sample has no spread at all
    pub const FALLBACK_BANDWIDTH: f64 = 1.0;

    /// How the kernel bandwidth is chosen
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum BandwidthRule {
        /// Caller-supplied bandwidth
        Fixed(f64),
        /// Scott's rule: 1.06 * σ * n^(-1/5)
        #[default]
        Scott,
        /// Silverman's rule: 0.9 * min(σ, IQR / 1.34) * n^(-1/5)
        Silverman,
    }

    impl BandwidthRule {
        /// Resolve the rule to a concrete bandwidth for `sample`
        ///
        /// A fixed bandwidth is returned as is and validated later by the
        /// kernel; the data-driven rules need a non-empty sample.
        pub fn resolve(&self, sample: &[f64]) -> Result<f64> {
            match *self {
                Self::Fixed(bandwidth) => Ok(bandwidth),
                Self::Scott => scott(sample),
                Self::Silverman => silverman(sample),
            }
        }
    }

    /// Scott's rule of thumb
    pub fn scott(sample: &[f64]) -> Result<f64> {
        let stats = SampleStats::from_sample(sample).ok_or(DensityError::EmptyDataset)?;
        if stats.std < f64::EPSILON {
            return Ok(FALLBACK_BANDWIDTH);
        }

        Ok(1.06 * stats.std * (stats.count as f64).powf(-0.2))
    }

    /// Silverman's rule of thumb, robust to heavy tails through the IQR
    pub fn silverman(sample: &[f64]) -> Result<f64> {
        let stats = SampleStats::from_sample(sample).ok_or(DensityError::EmptyDataset)?;
        if stats.std < f64::EPSILON {
            return Ok(FALLBACK_BANDWIDTH);
        }

        let iqr = interquartile_range(sample).unwrap_or(0.0);
        let robust = iqr / 1.34;
        let spread = if robust > 0.0 {
            stats.std.min(robust)
        } else {
            stats.std
        };

        Ok(0.9 * spread * (stats.count as f64).powf(-0.2))
    }
}

/// Input validation utilities
pub mod validation {
    use crate::core::{DensityError, Result};

    /// Reject NaN and infinite values
    pub fn ensure_finite(values: &[f64], what: &str) -> Result<()> {
        match values.iter().position(|v| !v.is_finite()) {
            Some(idx) => Err(DensityError::InvalidDataset(format!(
                "{what} contains a non-finite value at position {idx}: {}",
                values[idx]
            ))),
            None => Ok(()),
        }
    }
}

/// Evenly spaced grid covering every observation, widened by `padding` on both sides
pub fn grid_for_samples(
    samples: &GroupedSamples,
    n_points: usize,
    padding: f64,
) -> Result<EvaluationGrid> {
    if !padding.is_finite() || padding < 0.0 {
        return Err(DensityError::InvalidParameter(format!(
            "Padding must be non-negative and finite, got: {padding}"
        )));
    }

    let values = samples.all_values();
    let stats = stats::SampleStats::from_sample(&values).ok_or(DensityError::EmptyDataset)?;
    EvaluationGrid::linspace(stats.min - padding, stats.max + padding, n_points)
}
