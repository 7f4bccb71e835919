//! Per-iteration analysis metrics and their CSV export

use crate::io::error::{NoiseError, Result};
use crate::io::image::create_parent_dir;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const CSV_HEADER: &str = "iteration,segment_count,fractal_dimension,average_distance";

/// Metrics of the batch after one iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisRow {
    /// 1-based iteration number, 0 for the noise-free batch
    pub iteration: usize,
    /// Total directions across the batch
    pub segment_count: usize,
    /// Fractal dimension of the batch
    pub fractal_dimension: f64,
    /// Mean distance of the noised boundaries to the originals
    pub average_distance: f64,
}

impl fmt::Display for AnalysisRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{:.6},{:.6}",
            self.iteration, self.segment_count, self.fractal_dimension, self.average_distance
        )
    }
}

/// Rows collected over a noise run
#[derive(Debug, Clone, Default)]
pub struct AnalysisReport {
    rows: Vec<AnalysisRow>,
}

impl AnalysisReport {
    /// Create an empty report
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Append the metrics of one iteration
    pub fn push(&mut self, row: AnalysisRow) {
        self.rows.push(row);
    }

    /// Collected rows in insertion order
    pub fn rows(&self) -> &[AnalysisRow] {
        &self.rows
    }

    /// Write the report as CSV with a header row
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be created or written
    pub fn export_csv(&self, output_path: &Path) -> Result<()> {
        create_parent_dir(output_path)?;

        let wrap = |source: std::io::Error| NoiseError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "write report",
            source,
        };

        let mut file = BufWriter::new(File::create(output_path).map_err(wrap)?);
        writeln!(file, "{CSV_HEADER}").map_err(wrap)?;
        for row in &self.rows {
            writeln!(file, "{row}").map_err(wrap)?;
        }
        file.flush().map_err(wrap)
    }
}
