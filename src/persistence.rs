//! Density report serialization
//!
//! This module writes estimated density curves to JSON so that a plotting
//! front end (or a later `genint info` call) can pick them up without
//! recomputing anything.

use crate::api::DensityReport;
use crate::core::{DensityError, DensitySeries, EvaluationGrid, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Kernel identifier written to reports
pub const KERNEL_TYPE: &str = "epanechnikov";

/// Serializable representation of a density report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableReport {
    /// Kernel bandwidth shared by all series
    pub bandwidth: f64,
    /// Kernel type identifier
    pub kernel_type: String,
    /// Evaluation grid shared by all series
    pub grid: EvaluationGrid,
    /// One density curve per group
    pub series: Vec<DensitySeries>,
    /// Report metadata
    pub metadata: ReportMetadata,
}

/// Report metadata for tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Library version used to create the report
    pub library_version: String,
    /// Number of series
    pub n_series: usize,
    /// Number of observations across all series
    pub n_observations: usize,
    /// Creation timestamp
    pub created_at: String,
}

impl SerializableReport {
    /// Create a serializable report from an estimated one
    pub fn from_report(report: &DensityReport) -> Self {
        Self {
            bandwidth: report.bandwidth,
            kernel_type: KERNEL_TYPE.to_string(),
            grid: report.grid.clone(),
            series: report.series.clone(),
            metadata: ReportMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                n_series: report.series.len(),
                n_observations: report.n_observations(),
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    /// Convert back to an in-memory report
    pub fn to_report(&self) -> Result<DensityReport> {
        if self.kernel_type != KERNEL_TYPE {
            return Err(DensityError::InvalidParameter(format!(
                "Unsupported kernel type: {}",
                self.kernel_type
            )));
        }

        Ok(DensityReport {
            bandwidth: self.bandwidth,
            grid: self.grid.clone(),
            series: self.series.clone(),
        })
    }

    /// Save report to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(DensityError::IoError)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| DensityError::SerializationError(e.to_string()))?;
        Ok(())
    }

    /// Load report from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(DensityError::IoError)?;
        let reader = BufReader::new(file);
        let report = serde_json::from_reader(reader)
            .map_err(|e| DensityError::SerializationError(e.to_string()))?;
        Ok(report)
    }

    /// Print report summary
    pub fn print_summary(&self) {
        println!("=== Density Report Summary ===");
        println!("Kernel Type: {}", self.kernel_type);
        println!("Bandwidth: {:.6}", self.bandwidth);
        println!("Grid Points: {}", self.grid.len());
        if let (Some(first), Some(last)) = (self.grid.points().first(), self.grid.points().last())
        {
            println!("Grid Range: [{first}, {last}]");
        }
        println!("Series: {}", self.metadata.n_series);
        println!("Observations: {}", self.metadata.n_observations);
        println!("Library Version: {}", self.metadata.library_version);
        println!("Created: {}", self.metadata.created_at);
    }
}
