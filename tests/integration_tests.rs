//! Integration tests for the genint library
//!
//! These tests verify end-to-end functionality across multiple modules
//! and validate real-world usage scenarios.

use approx::assert_relative_eq;
use genint::api::{quick, DensityPlot};
use genint::persistence::SerializableReport;
use genint::{
    epanechnikov, kernel_density_estimator, BandwidthRule, DensityError, EpanechnikovKernel,
    EvaluationGrid, GroupedSamples, Kernel, KernelDensityEstimator,
};
use std::io::Write;
use tempfile::NamedTempFile;

/// Test complete workflow: CSV loading -> estimation -> report -> reload
#[test]
fn test_complete_workflow_csv() {
    let mut temp_file = NamedTempFile::with_suffix(".csv").expect("Failed to create temp file");

    writeln!(temp_file, "population,segment_length").expect("Failed to write");
    for value in [2.0, 2.5, 3.0, 3.5, 4.0] {
        writeln!(temp_file, "AFR,{value}").expect("Failed to write");
    }
    for value in [10.0, 11.0, 12.0] {
        writeln!(temp_file, "EUR,{value}").expect("Failed to write");
    }
    temp_file.flush().expect("Failed to flush");

    let report = DensityPlot::new()
        .with_bandwidth(1.5)
        .with_grid_points(1001)
        .with_padding(2.0)
        .estimate_csv(temp_file.path())
        .expect("Estimation should succeed");

    assert_eq!(report.series.len(), 2);
    assert_eq!(report.n_observations(), 8);

    // Every curve covers its full support, so each integrates to one
    for series in &report.series {
        assert_relative_eq!(series.curve.area(), 1.0, epsilon = 1e-3);
        assert!(series.curve.iter().all(|p| p.density >= 0.0));
    }

    let afr_peak = report.series_for("AFR").unwrap().curve.peak().unwrap();
    let eur_peak = report.series_for("EUR").unwrap().curve.peak().unwrap();
    assert!((2.0..=4.0).contains(&afr_peak.x));
    assert!((10.0..=12.0).contains(&eur_peak.x));

    let report_file = NamedTempFile::new().expect("Failed to create temp file");
    SerializableReport::from_report(&report)
        .save_to_file(report_file.path())
        .expect("Save should succeed");

    let loaded = SerializableReport::load_from_file(report_file.path())
        .expect("Load should succeed")
        .to_report()
        .expect("Report should convert");
    assert_eq!(loaded.series.len(), 2);
    assert_eq!(loaded.grid.len(), 1001);
    assert_eq!(loaded.bandwidth, 1.5);
}

#[test]
fn test_kernel_peak_for_any_bandwidth() {
    for bandwidth in [0.01, 0.5, 1.0, 7.0, 250.0] {
        let kernel = EpanechnikovKernel::new(bandwidth).unwrap();
        assert_relative_eq!(kernel.weight(0.0), 0.75 / bandwidth);
    }
}

#[test]
fn test_kernel_zero_outside_support() {
    for bandwidth in [0.5, 1.0, 3.0] {
        let kernel = EpanechnikovKernel::new(bandwidth).unwrap();
        for factor in [1.001, 1.5, 10.0] {
            assert_eq!(kernel.weight(bandwidth * factor), 0.0);
            assert_eq!(kernel.weight(-bandwidth * factor), 0.0);
        }
    }
}

#[test]
fn test_kernel_symmetric() {
    let kernel = epanechnikov(2.0).unwrap();
    for i in 0..50 {
        let u = i as f64 * 0.1;
        assert_eq!(kernel(u), kernel(-u));
    }
}

#[test]
fn test_kernel_rejects_non_positive_bandwidth() {
    assert!(matches!(
        EpanechnikovKernel::new(0.0),
        Err(DensityError::InvalidParameter(_))
    ));
    assert!(matches!(
        EpanechnikovKernel::new(-1.0),
        Err(DensityError::InvalidParameter(_))
    ));
}

#[test]
fn test_estimator_concrete_scenarios() {
    let estimate = kernel_density_estimator(EpanechnikovKernel::new(1.0).unwrap(), vec![0.0]);

    assert_eq!(estimate(&[0.0, 0.0, 0.0]).to_pairs(), vec![(0.0, 0.75)]);
    assert_eq!(estimate(&[-2.0, 2.0]).to_pairs(), vec![(0.0, 0.0)]);
}

#[test]
fn test_estimator_empty_inputs() {
    let kernel = EpanechnikovKernel::new(1.0).unwrap();

    let kde = KernelDensityEstimator::new(kernel, vec![1.0, 2.0, 3.0]);
    assert_eq!(
        kde.evaluate(&[]).to_pairs(),
        vec![(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]
    );

    let kde = KernelDensityEstimator::new(kernel, EvaluationGrid::default());
    assert!(kde.evaluate(&[1.0, 2.0]).is_empty());
}

#[test]
fn test_estimator_preserves_grid_order() {
    let kde = KernelDensityEstimator::new(EpanechnikovKernel::new(1.0).unwrap(), vec![3.0, 1.0, 2.0]);

    for sample in [[1.0, 2.0, 3.0], [3.0, 1.0, 2.0], [2.0, 3.0, 1.0]] {
        let xs: Vec<f64> = kde.evaluate(&sample).iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![3.0, 1.0, 2.0]);
    }
}

#[test]
fn test_estimator_reuse_across_samples() {
    let grid = EvaluationGrid::linspace(-1.0, 1.0, 21).unwrap();
    let kde = KernelDensityEstimator::new(EpanechnikovKernel::new(0.5).unwrap(), grid);

    let first = kde.evaluate(&[0.0, 0.1, -0.2]);
    let _other = kde.evaluate(&[0.9, 0.8]);
    let again = kde.evaluate(&[0.0, 0.1, -0.2]);

    assert_eq!(first, again);
}

#[test]
fn test_estimator_shared_across_threads() {
    let kde = KernelDensityEstimator::new(
        EpanechnikovKernel::new(1.0).unwrap(),
        EvaluationGrid::linspace(0.0, 10.0, 101).unwrap(),
    );
    let samples: Vec<Vec<f64>> = (0..4).map(|g| vec![g as f64 * 2.0, g as f64 * 2.0 + 0.5]).collect();

    let shared = &kde;
    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = samples
            .iter()
            .map(|sample| scope.spawn(move || shared.evaluate(sample)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("Thread should not panic"))
            .collect()
    });

    for (sample, curve) in samples.iter().zip(parallel.iter()) {
        assert_eq!(&kde.evaluate(sample), curve);
    }
}

#[test]
fn test_grouped_samples_with_rules() {
    let mut samples = GroupedSamples::new();
    samples.insert("AMR", vec![5.0, 5.5, 6.0, 7.0, 7.5]);
    samples.insert("EAS", vec![8.0, 9.0, 9.5]);

    for rule in [BandwidthRule::Scott, BandwidthRule::Silverman] {
        let report = DensityPlot::new()
            .with_bandwidth_rule(rule)
            .with_grid_range(0.0, 15.0)
            .with_grid_points(301)
            .estimate_groups(&samples)
            .expect("Estimation should succeed");

        assert!(report.bandwidth > 0.0);
        assert_eq!(report.series.len(), 2);
        assert_eq!(report.series[0].group, "AMR");
        assert_eq!(report.series[1].group, "EAS");
    }
}

#[test]
fn test_quick_density() {
    let curve = quick::density(&[1.0, 2.0, 3.0], 1.0, 0.0, 4.0, 401).expect("Should succeed");
    assert_eq!(curve.len(), 401);
    assert_relative_eq!(curve.area(), 1.0, epsilon = 1e-3);
    assert!((1.0..=3.0).contains(&curve.peak().unwrap().x));
}

#[test]
fn test_quick_densities_from_csv() {
    let mut temp_file = NamedTempFile::with_suffix(".csv").expect("Failed to create temp file");
    for value in [1.0, 2.0, 2.5, 4.0] {
        writeln!(temp_file, "{value}").expect("Failed to write");
    }
    temp_file.flush().expect("Failed to flush");

    let report = quick::densities_from_csv(temp_file.path()).expect("Should succeed");
    assert_eq!(report.series.len(), 1);
    assert_eq!(report.series[0].group, "all");
    assert_eq!(report.grid.len(), 512);
}

#[test]
fn test_error_handling() {
    // Non-existent file
    let result = DensityPlot::new().estimate_csv("/nonexistent/file.csv");
    assert!(matches!(result, Err(DensityError::IoError(_))));

    // Malformed file
    let mut temp_file = NamedTempFile::with_suffix(".csv").expect("Failed to create temp file");
    writeln!(temp_file, "AFR,1.0").expect("Failed to write");
    writeln!(temp_file, "AFR,not-a-number").expect("Failed to write");
    temp_file.flush().expect("Failed to flush");

    let result = DensityPlot::new().estimate_csv(temp_file.path());
    assert!(matches!(result, Err(DensityError::ParseError(_))));

    // Inverted grid bounds
    let result = quick::density(&[1.0], 1.0, 5.0, 0.0, 10);
    assert!(matches!(result, Err(DensityError::InvalidParameter(_))));
}
