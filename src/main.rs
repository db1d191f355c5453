use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use bandsweep_dtw::{BandFraction, DtwEngine, Series, Variant};
use bandsweep_io::{Dimensionality, ExperimentName, ResultWriter, SeriesReader, TextReporter};
use bandsweep_knn::{NearestNeighbor, Split, SweepConfig, SweepData};

#[derive(Parser)]
#[command(name = "bandsweep")]
#[command(about = "Band-limited DTW nearest-neighbour classification sweeps")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate every variant x band configuration and report accuracy and time
    Sweep {
        /// One-dimensional training series (label followed by values)
        #[arg(long)]
        train: PathBuf,

        /// One-dimensional test series
        #[arg(long)]
        test: PathBuf,

        /// Three-dimensional training series (label followed by x y z triples)
        #[arg(long)]
        train_3d: PathBuf,

        /// Three-dimensional test series
        #[arg(long)]
        test_3d: PathBuf,

        /// Comma-separated variants to evaluate: dtw, dtw-i, dtw-d
        #[arg(long, value_delimiter = ',', default_values_t = vec!["dtw".to_string(), "dtw-i".to_string(), "dtw-d".to_string()])]
        variants: Vec<String>,

        /// Comma-separated band fractions (10 = unconstrained)
        #[arg(long, value_delimiter = ',', default_values_t = BandFraction::DEFAULT_SWEEP.map(|b| b.value()).to_vec())]
        bands: Vec<f64>,

        /// Widen each band to the length difference of the pair being compared
        #[arg(long, default_value_t = false)]
        widen_band: bool,

        /// Experiment name for the JSON artifact (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: Option<String>,

        /// Output directory for the JSON artifact
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Evaluate a single configuration on one train/test pair
    Classify {
        /// Training series file
        #[arg(long)]
        train: PathBuf,

        /// Test series file
        #[arg(long)]
        test: PathBuf,

        /// Values per sample: 1 or 3
        #[arg(long, default_value_t = 1)]
        dims: usize,

        /// Distance variant: dtw, dtw-i, or dtw-d
        #[arg(long, default_value = "dtw")]
        variant: String,

        /// Band fraction (10 = unconstrained)
        #[arg(long, default_value_t = 10.0)]
        band: f64,

        /// Widen the band to the length difference of the pair being compared
        #[arg(long, default_value_t = false)]
        widen_band: bool,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct ClassifyOutput {
    variant: String,
    band_percent: f64,
    n_train: usize,
    n_test: usize,
    correct: usize,
    accuracy_percent: f64,
    elapsed_s: f64,
}

fn parse_dims(dims: usize) -> Result<Dimensionality> {
    match dims {
        1 => Ok(Dimensionality::Univariate),
        3 => Ok(Dimensionality::Trivariate),
        other => anyhow::bail!("unsupported sample width: {other} (expected 1 or 3)"),
    }
}

fn parse_variants(names: &[String]) -> Result<Vec<Variant>> {
    names
        .iter()
        .map(|n| n.parse::<Variant>().with_context(|| format!("invalid variant {n:?}")))
        .collect()
}

fn parse_bands(values: &[f64]) -> Result<Vec<BandFraction>> {
    values
        .iter()
        .map(|&v| BandFraction::new(v).with_context(|| format!("invalid band fraction {v}")))
        .collect()
}

fn load(path: &Path, dims: Dimensionality) -> Result<Vec<Series>> {
    SeriesReader::new(path, dims)
        .read()
        .with_context(|| format!("failed to read {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Sweep {
            train,
            test,
            train_3d,
            test_3d,
            variants,
            bands,
            widen_band,
            experiment,
            output_dir,
        } => {
            let config = SweepConfig::new()
                .with_variants(parse_variants(&variants)?)
                .with_bands(parse_bands(&bands)?)
                .with_length_difference_widening(widen_band);
            info!(
                variants = ?config.variants(),
                bands = ?config.bands(),
                widen_band,
                "sweep configured"
            );

            let writer = experiment
                .map(|name| -> Result<ResultWriter> {
                    let name = ExperimentName::new(name)?;
                    Ok(ResultWriter::new(&output_dir, name)?)
                })
                .transpose()?;

            let data = SweepData {
                univariate: Split::new(
                    load(&train, Dimensionality::Univariate)?,
                    load(&test, Dimensionality::Univariate)?,
                ),
                multivariate: Split::new(
                    load(&train_3d, Dimensionality::Trivariate)?,
                    load(&test_3d, Dimensionality::Trivariate)?,
                ),
            };
            info!(
                n_train = data.univariate.train.len(),
                n_test = data.univariate.test.len(),
                n_train_3d = data.multivariate.train.len(),
                n_test_3d = data.multivariate.test.len(),
                "datasets loaded"
            );

            let mut reporter = TextReporter::new(std::io::stdout().lock());
            let mut report_error = None;
            let report = config.run_with(&data, |record| {
                if report_error.is_none()
                    && let Err(e) = reporter.report(record)
                {
                    report_error = Some(e);
                }
            });
            if let Some(e) = report_error {
                return Err(e).context("failed to write report");
            }
            reporter.finish().context("failed to flush report")?;

            if let Some((record, eval)) = report.best() {
                info!(
                    variant = %record.variant,
                    band = %record.band,
                    accuracy = eval.accuracy,
                    "best configuration"
                );
            }

            if let Some(writer) = writer {
                let path = writer.write_sweep(&report)?;
                info!(path = %path.display(), "sweep artifact saved");
            }
        }

        Command::Classify {
            train,
            test,
            dims,
            variant,
            band,
            widen_band,
        } => {
            let dims = parse_dims(dims)?;
            let variant: Variant = variant.parse()?;
            let band = BandFraction::new(band)?;

            let train = load(&train, dims)?;
            let test = load(&test, dims)?;

            let mut engine = DtwEngine::new().with_length_difference_widening(widen_band);
            let knn = NearestNeighbor::new(variant, band);
            let eval = knn
                .evaluate(&mut engine, &train, &test)
                .context("classification failed")?;

            let output = ClassifyOutput {
                variant: knn.variant().to_string(),
                band_percent: knn.band().as_percent(),
                n_train: train.len(),
                n_test: test.len(),
                correct: eval.correct,
                accuracy_percent: eval.accuracy_percent(),
                elapsed_s: eval.elapsed.as_secs_f64(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
