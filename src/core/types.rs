//! Core type definitions for density estimation

use crate::core::{DensityError, Result};
use serde::{Deserialize, Serialize};

/// Ordered x-coordinates at which a density is evaluated
///
/// The grid is owned by the caller. Points are kept in the order given and
/// the estimator reports densities in that same order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationGrid {
    points: Vec<f64>,
}

impl EvaluationGrid {
    /// Create a grid from explicit points (any order, may be empty)
    pub fn new(points: Vec<f64>) -> Self {
        Self { points }
    }

    /// Create `n` evenly spaced points from `start` to `end` inclusive
    ///
    /// `n == 0` yields an empty grid and `n == 1` yields `[start]`.
    pub fn linspace(start: f64, end: f64, n: usize) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(DensityError::InvalidParameter(format!(
                "Grid bounds must be finite, got [{start}, {end}]"
            )));
        }
        if start > end {
            return Err(DensityError::InvalidParameter(format!(
                "Grid start must not exceed end, got [{start}, {end}]"
            )));
        }

        let points = match n {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let last = (n - 1) as f64;
                // Interpolate without `end - start`, which overflows for wide bounds
                let mut points: Vec<f64> = (0..n)
                    .map(|i| {
                        let t = i as f64 / last;
                        start * (1.0 - t) + end * t
                    })
                    .collect();
                // Pin the last point so rounding never overshoots the bound
                points[n - 1] = end;
                points
            }
        };

        Ok(Self { points })
    }

    /// Grid points in evaluation order
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of grid points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the grid has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<f64>> for EvaluationGrid {
    fn from(points: Vec<f64>) -> Self {
        Self::new(points)
    }
}

/// Estimated density at a single grid point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityPoint {
    /// Grid coordinate
    pub x: f64,
    /// Estimated density at `x`
    pub density: f64,
}

impl DensityPoint {
    /// Create a new density point
    pub fn new(x: f64, density: f64) -> Self {
        Self { x, density }
    }
}

/// Density curve: one point per grid point, in grid order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DensityCurve {
    points: Vec<DensityPoint>,
}

impl DensityCurve {
    /// Create a curve from already evaluated points
    pub fn new(points: Vec<DensityPoint>) -> Self {
        Self { points }
    }

    /// Curve points in grid order
    pub fn points(&self) -> &[DensityPoint] {
        &self.points
    }

    /// Iterate over the curve points
    pub fn iter(&self) -> std::slice::Iter<'_, DensityPoint> {
        self.points.iter()
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the curve is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Curve as `(x, density)` pairs
    pub fn to_pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.density)).collect()
    }

    /// Point with the highest density (NaN densities are ignored)
    pub fn peak(&self) -> Option<DensityPoint> {
        self.points
            .iter()
            .filter(|p| !p.density.is_nan())
            .copied()
            .max_by(|a, b| a.density.total_cmp(&b.density))
    }

    /// Trapezoidal area under the curve
    ///
    /// Assumes an ascending grid. Useful as a sanity check that a curve
    /// covering the whole support integrates to roughly one.
    pub fn area(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[1].x - w[0].x) * (w[0].density + w[1].density) / 2.0)
            .sum()
    }
}

impl<'a> IntoIterator for &'a DensityCurve {
    type Item = &'a DensityPoint;
    type IntoIter = std::slice::Iter<'a, DensityPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Density curve of a single group in a multi-series plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensitySeries {
    /// Group label (e.g. population or ancestry category)
    pub group: String,
    /// Number of observations the curve was estimated from
    pub n_observations: usize,
    /// Estimated density curve
    pub curve: DensityCurve,
}

impl DensitySeries {
    /// Create a new series
    pub fn new(group: impl Into<String>, n_observations: usize, curve: DensityCurve) -> Self {
        Self {
            group: group.into(),
            n_observations,
            curve,
        }
    }
}
