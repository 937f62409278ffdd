//! High-level API for density plots
//!
//! This module ties bandwidth selection, grid construction and the kernel
//! density estimator together behind a builder, so a plotting front end only
//! has to hand over its grouped observations.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use genint::api::DensityPlot;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = DensityPlot::new()
//!     .with_bandwidth(0.5)
//!     .with_grid_range(0.0, 50.0)
//!     .with_grid_points(256)
//!     .estimate_csv("segments.csv")?;
//!
//! for series in &report.series {
//!     println!("{}: {} observations", series.group, series.n_observations);
//! }
//! # Ok(())
//! # }
//! ```

use crate::core::{DensityCurve, DensityError, DensitySeries, EvaluationGrid, Result};
use crate::data::{GroupedSamples, DEFAULT_GROUP};
use crate::estimator::KernelDensityEstimator;
use crate::kernel::EpanechnikovKernel;
use crate::utils::bandwidth::BandwidthRule;
use crate::utils::grid_for_samples;
use crate::utils::validation::ensure_finite;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Configuration for a density plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Bandwidth selection
    pub bandwidth: BandwidthRule,
    /// Left grid bound (observed minimum minus padding when unset)
    pub grid_start: Option<f64>,
    /// Right grid bound (observed maximum plus padding when unset)
    pub grid_end: Option<f64>,
    /// Number of evaluation points
    pub grid_points: usize,
    /// Extra room added to automatically derived bounds
    pub padding: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            bandwidth: BandwidthRule::Scott,
            grid_start: None,
            grid_end: None,
            grid_points: 512,
            padding: 0.0,
        }
    }
}

impl EstimatorConfig {
    /// Load a configuration from a JSON file, missing fields take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(DensityError::IoError)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| DensityError::SerializationError(e.to_string()))
    }
}

/// Density curves for every group of a plot, sharing one bandwidth and one grid
#[derive(Debug, Clone, PartialEq)]
pub struct DensityReport {
    pub bandwidth: f64,
    pub grid: EvaluationGrid,
    pub series: Vec<DensitySeries>,
}

impl DensityReport {
    /// Look up the series of a single group
    pub fn series_for(&self, group: &str) -> Option<&DensitySeries> {
        self.series.iter().find(|s| s.group == group)
    }

    /// Total number of observations across all series
    pub fn n_observations(&self) -> usize {
        self.series.iter().map(|s| s.n_observations).sum()
    }
}

/// High-level density plot interface with builder pattern
#[derive(Debug, Clone, Default)]
pub struct DensityPlot {
    config: EstimatorConfig,
}

impl DensityPlot {
    /// Create a new plot with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EstimatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a fixed kernel bandwidth
    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        self.config.bandwidth = BandwidthRule::Fixed(bandwidth);
        self
    }

    /// Set the bandwidth selection rule
    pub fn with_bandwidth_rule(mut self, rule: BandwidthRule) -> Self {
        self.config.bandwidth = rule;
        self
    }

    /// Set explicit grid bounds
    pub fn with_grid_range(mut self, start: f64, end: f64) -> Self {
        self.config.grid_start = Some(start);
        self.config.grid_end = Some(end);
        self
    }

    /// Set the number of evaluation points
    pub fn with_grid_points(mut self, grid_points: usize) -> Self {
        self.config.grid_points = grid_points;
        self
    }

    /// Set the padding around automatically derived bounds
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.config.padding = padding;
        self
    }

    /// Get the current configuration
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate one density curve per group
    ///
    /// Data-driven bandwidth rules are resolved on the pooled observations so
    /// every series is smoothed the same way and curves stay comparable.
    pub fn estimate_groups(&self, samples: &GroupedSamples) -> Result<DensityReport> {
        for (group, values) in samples.iter() {
            ensure_finite(values, &format!("group `{group}`"))?;
        }

        let pooled = samples.all_values();
        let bandwidth = self.config.bandwidth.resolve(&pooled)?;
        let kernel = EpanechnikovKernel::new(bandwidth)?;
        let grid = self.build_grid(samples)?;

        debug!(
            "Estimating {} groups ({} observations) with bandwidth {:.6} over {} grid points",
            samples.len(),
            pooled.len(),
            bandwidth,
            grid.len()
        );

        let estimator = KernelDensityEstimator::new(kernel, grid);
        let series = estimator.evaluate_groups(samples);

        Ok(DensityReport {
            bandwidth,
            grid: estimator.grid().clone(),
            series,
        })
    }

    /// Estimate the density curve of a single sample
    pub fn estimate(&self, sample: &[f64]) -> Result<DensityCurve> {
        let mut samples = GroupedSamples::new();
        samples.insert(DEFAULT_GROUP, sample.to_vec());

        let report = self.estimate_groups(&samples)?;
        report
            .series
            .into_iter()
            .next()
            .map(|series| series.curve)
            .ok_or(DensityError::EmptyDataset)
    }

    /// Estimate density curves from a `group,value` CSV file
    pub fn estimate_csv<P: AsRef<Path>>(&self, path: P) -> Result<DensityReport> {
        let samples = GroupedSamples::from_csv_file(path)?;
        self.estimate_groups(&samples)
    }

    fn build_grid(&self, samples: &GroupedSamples) -> Result<EvaluationGrid> {
        let config = &self.config;
        if let (Some(start), Some(end)) = (config.grid_start, config.grid_end) {
            return EvaluationGrid::linspace(start, end, config.grid_points);
        }

        if samples.total_observations() == 0 {
            return Err(DensityError::InvalidParameter(
                "Grid bounds are required when there are no observations".to_string(),
            ));
        }

        let auto = grid_for_samples(samples, 2, config.padding)?;
        let (auto_start, auto_end) = (auto.points()[0], auto.points()[1]);
        EvaluationGrid::linspace(
            config.grid_start.unwrap_or(auto_start),
            config.grid_end.unwrap_or(auto_end),
            config.grid_points,
        )
    }
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;

    /// Density of a single sample with a fixed bandwidth on an evenly spaced grid
    pub fn density(
        sample: &[f64],
        bandwidth: f64,
        start: f64,
        end: f64,
        grid_points: usize,
    ) -> Result<DensityCurve> {
        DensityPlot::new()
            .with_bandwidth(bandwidth)
            .with_grid_range(start, end)
            .with_grid_points(grid_points)
            .estimate(sample)
    }

    /// Per-group densities from a CSV file with default parameters
    pub fn densities_from_csv<P: AsRef<Path>>(path: P) -> Result<DensityReport> {
        DensityPlot::new().estimate_csv(path)
    }
}
