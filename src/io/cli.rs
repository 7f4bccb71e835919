//! Command-line interface for batch noising of chain code datasets

use crate::analysis::{DistanceMetric, NoiseAnalyzer, fractal_dimension};
use crate::chaincode::ChainCode;
use crate::chaincode::geometry::normalize_and_frame;
use crate::io::configuration::{
    DATASET_EXTENSION, DEFAULT_ITERATIONS, DEFAULT_NOISE_PROBABILITY, DEFAULT_SEED,
    GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX, REPORT_SUFFIX,
};
use crate::io::error::{NoiseError, Result, invalid_parameter};
use crate::io::image::export_frame_as_png;
use crate::io::progress::ProgressManager;
use crate::io::reader::read_dataset;
use crate::io::report::{AnalysisReport, AnalysisRow};
use crate::io::visualization::IterationCapture;
use crate::noise::{NoiseConfig, NoiseEngine, NoiseSession};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "chainnoise")]
#[command(
    author,
    version,
    about = "Add self-touch free noise to chain-coded shape boundaries"
)]
/// Command-line arguments for the noise tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Dataset file or directory of datasets to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible noise
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Probability that a direction pair is considered for a rewrite
    #[arg(short, long, default_value_t = DEFAULT_NOISE_PROBABILITY)]
    pub probability: f64,

    /// Number of noise passes over each dataset
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Distance used by the analysis report
    #[arg(short, long, value_enum, default_value_t = DistanceMetric::Manhattan)]
    pub metric: DistanceMetric,

    /// Write an animated GIF with one frame per iteration
    #[arg(short, long)]
    pub visualize: bool,

    /// Write a CSV report with per-iteration metrics
    #[arg(short, long)]
    pub analysis: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process datasets even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Engine parameters selected on the command line
    pub const fn noise_config(&self) -> NoiseConfig {
        NoiseConfig {
            noise_probability: self.probability,
            iterations: self.iterations,
            seed: self.seed,
        }
    }
}

/// Where the outputs of one dataset are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Final noised boundaries
    pub image: PathBuf,
    /// Per-iteration animation
    pub animation: PathBuf,
    /// Per-iteration metrics
    pub report: PathBuf,
}

impl OutputPaths {
    /// Output paths next to the dataset, named after its stem
    pub fn for_dataset(input_path: &Path) -> Self {
        let stem = input_path.file_stem().unwrap_or_default().to_string_lossy();
        let sibling = |name: String| match input_path.parent() {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        };

        Self {
            image: sibling(format!("{stem}{OUTPUT_SUFFIX}.png")),
            animation: sibling(format!("{stem}{OUTPUT_SUFFIX}.gif")),
            report: sibling(format!("{stem}{REPORT_SUFFIX}.csv")),
        }
    }
}

/// Orchestrates batch processing of datasets with progress tracking
pub struct DatasetProcessor {
    cli: Cli,
    progress_manager: ProgressManager,
}

impl DatasetProcessor {
    /// Create a new dataset processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process datasets according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters or the target are invalid, or if
    /// any dataset fails to load, process or export
    pub fn process(&mut self) -> Result<()> {
        self.cli.noise_config().validate()?;

        let datasets = self.collect_datasets()?;
        if datasets.is_empty() {
            info!(path = %self.cli.target.display(), "Nothing to process");
            return Ok(());
        }

        self.progress_manager.initialize(datasets.len());
        for (index, dataset) in datasets.iter().enumerate() {
            self.process_dataset(dataset, index)?;
        }
        self.progress_manager.finish();

        Ok(())
    }

    /// Datasets selected by the target, sorted, without already processed ones
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a dataset file nor a
    /// readable directory
    pub fn collect_datasets(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;

        if target.is_file() {
            if !is_dataset(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &format!("dataset files must have the .{DATASET_EXTENSION} extension"),
                ));
            }
            return Ok(self
                .should_process(target)
                .then(|| target.clone())
                .into_iter()
                .collect());
        }

        if !target.is_dir() {
            return Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a dataset file or a directory",
            ));
        }

        let read_error = |source: std::io::Error| NoiseError::FileSystem {
            path: target.clone(),
            operation: "list datasets",
            source,
        };

        let mut datasets = Vec::new();
        for entry in std::fs::read_dir(target).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            if path.is_file() && is_dataset(&path) && self.should_process(&path) {
                datasets.push(path);
            }
        }
        datasets.sort();
        Ok(datasets)
    }

    fn should_process(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output = OutputPaths::for_dataset(input_path).image;
        if output.exists() {
            warn!(
                dataset = %input_path.display(),
                output = %output.display(),
                "Skipping dataset, output exists"
            );
            false
        } else {
            true
        }
    }

    fn process_dataset(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let started = Instant::now();
        let config = self.cli.noise_config();
        let outputs = OutputPaths::for_dataset(input_path);

        let chain_codes = read_dataset(input_path)?;
        let (mut session, _) = NoiseSession::framed(chain_codes)?;
        let analyzer = NoiseAnalyzer::new(session.chain_codes().to_vec());

        self.progress_manager.start_dataset(
            index,
            input_path,
            config.iterations,
            session.segment_count(),
        );

        let mut capture = self
            .cli
            .visualize
            .then(|| IterationCapture::with_capacity(config.iterations));
        if let Some(capture) = &mut capture {
            capture.record(session.chain_codes());
        }

        let mut report = self.cli.analysis.then(AnalysisReport::new);
        if let Some(report) = &mut report {
            report.push(analysis_row(&analyzer, self.cli.metric, 0, analyzer.originals())?);
        }

        // The observer cannot fail, so the first error is held until the run ends
        let mut deferred: Result<()> = Ok(());
        let metric = self.cli.metric;
        let progress = &mut self.progress_manager;

        let mut engine = NoiseEngine::from_config(&config);
        engine.apply_noise(
            &mut session,
            config.noise_probability,
            config.iterations,
            |iteration, state| {
                progress.update_iteration(index, iteration.iteration, iteration.segment_count);
                if deferred.is_err() {
                    return;
                }
                deferred = record_iteration(
                    capture.as_mut(),
                    report.as_mut(),
                    &analyzer,
                    metric,
                    iteration.iteration,
                    state.chain_codes(),
                );
            },
        )?;
        deferred?;

        export_frame_as_png(&normalize_and_frame(session.chain_codes())?, &outputs.image)?;
        if let Some(capture) = &capture {
            capture.export_gif(&outputs.animation, GIF_FRAME_DELAY_MS)?;
        }
        if let Some(report) = &report {
            report.export_csv(&outputs.report)?;
        }

        self.progress_manager.complete_dataset(index);
        info!(
            dataset = %input_path.display(),
            segments = session.segment_count(),
            elapsed = ?started.elapsed(),
            "Dataset processed",
        );

        Ok(())
    }
}

fn is_dataset(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(DATASET_EXTENSION)
}

fn record_iteration(
    capture: Option<&mut IterationCapture>,
    report: Option<&mut AnalysisReport>,
    analyzer: &NoiseAnalyzer,
    metric: DistanceMetric,
    iteration: usize,
    chain_codes: &[ChainCode],
) -> Result<()> {
    if let Some(capture) = capture {
        capture.record(chain_codes);
    }
    if let Some(report) = report {
        report.push(analysis_row(analyzer, metric, iteration, chain_codes)?);
    }
    Ok(())
}

fn analysis_row(
    analyzer: &NoiseAnalyzer,
    metric: DistanceMetric,
    iteration: usize,
    chain_codes: &[ChainCode],
) -> Result<AnalysisRow> {
    Ok(AnalysisRow {
        iteration,
        segment_count: chain_codes.iter().map(ChainCode::len).sum(),
        fractal_dimension: fractal_dimension(chain_codes)?,
        average_distance: analyzer.average_distance(chain_codes, metric)?,
    })
}
