//! KS Image Compare CLI
//!
//! Command-line front end: compares two images (or two synthetic samples)
//! and prints the Kolmogorov-Smirnov results table.

use clap::{Parser, Subcommand};
use ks_image_compare::{
    analysis::{AnalysisError, Comparison, Sample},
    config::{ConfigError, FileConfig},
    extraction::{acquire_pair, ImageFileSource, SampleSource, SourceError, SyntheticSource},
    metrics::{MetricsError, MetricsRegistry, MetricsSnapshot},
    report::{write_distribution_file, ComparisonReport, ReportError, SampleSummary},
    session::ComparisonSession,
};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "ks-compare", version, about = "Compare image intensity distributions with a two-sample KS test")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Significance level (overrides the config file).
    #[arg(long, short, global = true)]
    alpha: Option<f64>,

    /// Write the TOML report here.
    #[arg(long, global = true)]
    report: Option<PathBuf>,

    /// Write the per-level CSV distribution table here.
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    /// Print Prometheus metrics after the comparison.
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare two image files.
    Compare {
        /// First image.
        image1: PathBuf,
        /// Second image.
        image2: PathBuf,
    },
    /// Compare two synthetic samples.
    Demo {
        /// Seed for the first sample; the second uses seed + 1.
        #[arg(long)]
        seed: Option<u64>,
        /// Values per sample.
        #[arg(long)]
        size: Option<usize>,
        /// Shift of the second sample's center, in intensity levels.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        shift: i16,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error("comparison produced no result")]
    NoResult,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("KS Image Compare v{}", ks_image_compare::VERSION);

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };

    if let Some(alpha) = cli.alpha {
        config.analysis.alpha = alpha;
    }
    if cli.report.is_some() {
        config.output.report = cli.report.clone();
    }
    if cli.table.is_some() {
        config.output.table = cli.table.clone();
    }
    config.output.metrics |= cli.metrics;

    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config(&cli)?;

    let (mut first, mut second): (Box<dyn SampleSource>, Box<dyn SampleSource>) = match cli.command {
        Command::Compare { image1, image2 } => {
            let open = |path: PathBuf| {
                let source = ImageFileSource::new(path);
                match config.max_pixels() {
                    Some(max) => source.with_max_pixels(max),
                    None => source,
                }
            };
            (
                Box::new(open(image1)) as Box<dyn SampleSource>,
                Box::new(open(image2)) as Box<dyn SampleSource>,
            )
        }
        Command::Demo { seed, size, shift } => {
            if let Some(seed) = seed {
                config.sampling.synthetic_seed = seed;
            }
            if let Some(size) = size {
                config.sampling.synthetic_size = size;
            }
            config.validate()?;

            let seed = config.sampling.synthetic_seed;
            let size = config.sampling.synthetic_size;
            let shifted = (128 + i32::from(shift)).clamp(0, 255) as u8;
            (
                Box::new(SyntheticSource::new(seed, size)) as Box<dyn SampleSource>,
                Box::new(SyntheticSource::new(seed.wrapping_add(1), size).with_shape(shifted, 64))
                    as Box<dyn SampleSource>,
            )
        }
    };

    let (a, b) = acquire_pair(first.as_mut(), second.as_mut())?;
    let alpha = config.analysis.alpha;
    info!(alpha, first = a.len(), second = b.len(), "Running KS comparison");

    let mut session = ComparisonSession::new();
    session.submit(&a, &b, alpha);
    let comparison = session.wait().ok_or(CliError::NoResult)??;

    let report = ComparisonReport::new(
        &comparison,
        SampleSummary::new(first.describe(), &a),
        SampleSummary::new(second.describe(), &b),
    );

    println!("{report}");
    info!("{}", report.status_line());

    if let Some(path) = &config.output.report {
        report.write_toml(path)?;
    }
    if let Some(path) = &config.output.table {
        write_distribution_file(path, &comparison)?;
    }
    if config.output.metrics {
        print_metrics(&session, &comparison, &a, &b)?;
    }

    if comparison.result.verdict.is_significant() {
        warn!(
            statistic = comparison.result.statistic,
            p_value = comparison.result.p_value,
            "Distributions differ significantly"
        );
    }

    Ok(())
}

fn print_metrics(
    session: &ComparisonSession,
    comparison: &Comparison,
    a: &Sample,
    b: &Sample,
) -> Result<(), CliError> {
    let registry = MetricsRegistry::new()?;
    let significant = u64::from(comparison.result.verdict.is_significant());
    let pixels = (a.len() + b.len()) as u64;

    registry.update(&MetricsSnapshot::from_session(
        &session.stats(),
        significant,
        Some((&comparison.result, pixels)),
    ));
    println!("{}", registry.encode()?);
    Ok(())
}
