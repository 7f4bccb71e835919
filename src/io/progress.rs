//! Per-dataset iteration progress with a batch bar for long target lists

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static ITERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>24} [{bar:30.green/white}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Datasets: [{bar:40.green/white}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Display state of one dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetProgress {
    /// File name shown next to the bar
    pub name: String,
    /// Iterations finished so far
    pub iteration: usize,
    /// Iterations requested
    pub iterations: usize,
    /// Segment count after the last finished iteration
    pub segments: usize,
    /// Whether all outputs of the dataset were written
    pub done: bool,
}

impl DatasetProgress {
    fn message(&self) -> String {
        let width = self.iterations.to_string().len();
        let mark = if self.done { " done" } else { "" };
        format!(
            "{:>width$}/{} iterations, {} segments{mark}",
            self.iteration, self.iterations, self.segments
        )
    }
}

/// Coordinates progress display while datasets are processed one by one
///
/// Only the most recent `MAX_INDIVIDUAL_PROGRESS_BARS` datasets get a bar;
/// longer target lists add an overall batch bar on top.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    dataset_bars: Vec<ProgressBar>,
    datasets: Vec<DatasetProgress>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Progress manager drawing to the terminal
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Progress manager that tracks state without drawing anything
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(target),
            batch_bar: None,
            dataset_bars: Vec::new(),
            datasets: Vec::new(),
        }
    }

    /// Create the bars for `dataset_count` datasets
    pub fn initialize(&mut self, dataset_count: usize) {
        if dataset_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(dataset_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..dataset_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(ITERATION_STYLE.clone());
            self.dataset_bars.push(self.multi_progress.add(bar));
        }

        self.datasets = vec![DatasetProgress::default(); dataset_count];
    }

    /// Register the dataset at `index` as started
    pub fn start_dataset(&mut self, index: usize, path: &Path, iterations: usize, segments: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();

        if index >= self.datasets.len() {
            self.datasets.resize(index + 1, DatasetProgress::default());
        }
        if let Some(state) = self.datasets.get_mut(index) {
            *state = DatasetProgress {
                name,
                iteration: 0,
                iterations,
                segments,
                done: false,
            };
        }
        self.redraw();
    }

    /// Record a finished iteration of the dataset at `index`
    pub fn update_iteration(&mut self, index: usize, iteration: usize, segments: usize) {
        if let Some(state) = self.datasets.get_mut(index) {
            state.iteration = iteration;
            state.segments = segments;
        }
        self.redraw();
    }

    /// Mark the dataset at `index` as finished
    pub fn complete_dataset(&mut self, index: usize) {
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.datasets.get_mut(index) {
            state.iteration = state.iterations;
            state.done = true;
        }
        self.redraw();
    }

    /// Current state of the dataset at `index`
    pub fn dataset(&self, index: usize) -> Option<&DatasetProgress> {
        self.datasets.get(index)
    }

    /// Remove every bar from the terminal
    pub fn finish(&self) {
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.finish_with_message("All datasets processed");
        }
        // Nothing useful can be done if the terminal refuses to clear
        let _ = self.multi_progress.clear();
    }

    // Bars show the most recently started datasets
    fn redraw(&self) {
        let started: Vec<&DatasetProgress> =
            self.datasets.iter().filter(|d| !d.name.is_empty()).collect();
        let first = started.len().saturating_sub(self.dataset_bars.len());
        let visible = started.get(first..).unwrap_or_default();

        for (slot, bar) in self.dataset_bars.iter().enumerate() {
            match visible.get(slot) {
                Some(state) => {
                    bar.set_length(state.iterations as u64);
                    bar.set_position(state.iteration as u64);
                    bar.set_prefix(state.name.clone());
                    bar.set_message(state.message());
                }
                None => {
                    bar.set_length(0);
                    bar.set_position(0);
                    bar.set_prefix(String::new());
                    bar.set_message(String::new());
                }
            }
        }
    }
}
