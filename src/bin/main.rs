//! genint Command Line Interface
//!
//! A command-line interface for estimating per-group density curves from
//! CSV observations and inspecting saved density reports.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use genint::api::{DensityPlot, EstimatorConfig};
use genint::core::{EvaluationGrid, Result};
use genint::persistence::SerializableReport;
use genint::{BandwidthRule, EpanechnikovKernel, GroupedSamples, Kernel};
use log::{error, info};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "genint")]
#[command(about = "Kernel density estimation for generation interval statistics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "genint contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate one density curve per group from a CSV file
    Estimate(EstimateArgs),
    /// Print Epanechnikov kernel weights over a range of distances
    Kernel(KernelArgs),
    /// Display a saved density report
    Info(InfoArgs),
}

#[derive(Args)]
struct EstimateArgs {
    /// Observations file (`group,value` CSV)
    #[arg(long)]
    data: PathBuf,

    /// Output report file (prints a peak table to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file; command line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fixed kernel bandwidth
    #[arg(short, long, conflicts_with = "rule")]
    bandwidth: Option<f64>,

    /// Data-driven bandwidth rule
    #[arg(long)]
    rule: Option<CliBandwidthRule>,

    /// Left grid bound
    #[arg(long, allow_hyphen_values = true)]
    start: Option<f64>,

    /// Right grid bound
    #[arg(long, allow_hyphen_values = true)]
    end: Option<f64>,

    /// Number of grid points
    #[arg(short, long)]
    points: Option<usize>,

    /// Padding added to automatically derived grid bounds
    #[arg(long)]
    padding: Option<f64>,
}

#[derive(ValueEnum, Clone, Debug)]
enum CliBandwidthRule {
    /// Scott's rule: 1.06 * sd * n^(-1/5)
    #[value(name = "scott")]
    Scott,
    /// Silverman's rule: 0.9 * min(sd, IQR / 1.34) * n^(-1/5)
    #[value(name = "silverman")]
    Silverman,
}

impl From<CliBandwidthRule> for BandwidthRule {
    fn from(cli_rule: CliBandwidthRule) -> Self {
        match cli_rule {
            CliBandwidthRule::Scott => BandwidthRule::Scott,
            CliBandwidthRule::Silverman => BandwidthRule::Silverman,
        }
    }
}

#[derive(Args)]
struct KernelArgs {
    /// Kernel bandwidth
    #[arg(short, long)]
    bandwidth: f64,

    /// First distance
    #[arg(long, default_value = "-2.0", allow_hyphen_values = true)]
    from: f64,

    /// Last distance
    #[arg(long, default_value = "2.0", allow_hyphen_values = true)]
    to: f64,

    /// Number of distances
    #[arg(short, long, default_value = "9")]
    points: usize,
}

#[derive(Args)]
struct InfoArgs {
    /// Report file
    report: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Estimate(args) => estimate_command(args),
        Commands::Kernel(args) => kernel_command(args),
        Commands::Info(args) => info_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn estimate_command(args: EstimateArgs) -> Result<()> {
    let config = build_config(&args)?;
    info!("Data file: {:?}", args.data);
    info!(
        "Parameters: bandwidth={:?}, points={}, padding={}",
        config.bandwidth, config.grid_points, config.padding
    );

    let samples = GroupedSamples::from_csv_file(&args.data)?;
    info!(
        "Loaded {} observations in {} groups",
        samples.total_observations(),
        samples.len()
    );

    let report = DensityPlot::new().with_config(config).estimate_groups(&samples)?;
    info!("Bandwidth: {:.6}", report.bandwidth);

    if let Some(output_path) = args.output {
        let serializable = SerializableReport::from_report(&report);
        serializable.save_to_file(&output_path)?;
        info!("Report saved to: {output_path:?}");
    } else {
        println!("# Bandwidth: {:.6}", report.bandwidth);
        println!("# Format: group observations peak_x peak_density");
        for series in &report.series {
            match series.curve.peak() {
                Some(peak) => println!(
                    "{} {} {:.6} {:.6}",
                    series.group, series.n_observations, peak.x, peak.density
                ),
                None => println!("{} {} - -", series.group, series.n_observations),
            }
        }
    }

    Ok(())
}

/// Merge the optional config file with command line overrides
fn build_config(args: &EstimateArgs) -> Result<EstimatorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {path:?}");
            EstimatorConfig::from_file(path)?
        }
        None => EstimatorConfig::default(),
    };

    if let Some(bandwidth) = args.bandwidth {
        config.bandwidth = BandwidthRule::Fixed(bandwidth);
    }
    if let Some(rule) = &args.rule {
        config.bandwidth = rule.clone().into();
    }
    if args.start.is_some() {
        config.grid_start = args.start;
    }
    if args.end.is_some() {
        config.grid_end = args.end;
    }
    if let Some(points) = args.points {
        config.grid_points = points;
    }
    if let Some(padding) = args.padding {
        config.padding = padding;
    }

    Ok(config)
}

fn kernel_command(args: KernelArgs) -> Result<()> {
    let kernel = EpanechnikovKernel::new(args.bandwidth)?;
    let distances = EvaluationGrid::linspace(args.from, args.to, args.points)?;

    println!("# Epanechnikov kernel, bandwidth {}", kernel.bandwidth());
    println!("# Format: distance weight");
    for &u in distances.points() {
        println!("{:.6} {:.6}", u, kernel.weight(u));
    }

    Ok(())
}

fn info_command(args: InfoArgs) -> Result<()> {
    info!("Loading report from: {:?}", args.report);
    let serializable = SerializableReport::load_from_file(&args.report)?;
    let report = serializable.to_report()?;

    serializable.print_summary();

    println!("\nSeries:");
    for series in &report.series {
        let area = series.curve.area();
        match series.curve.peak() {
            Some(peak) => println!(
                "  {}: n={}, peak at {:.4} ({:.6}), area {:.4}",
                series.group, series.n_observations, peak.x, peak.density, area
            ),
            None => println!("  {}: n={}, empty curve", series.group, series.n_observations),
        }
    }

    Ok(())
}
