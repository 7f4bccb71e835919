//! Chain code dataset parsing
//!
//! A dataset starts with the header line followed by one record per line:
//! `type;orientation;x,y;directions`. Y is stored top-down in the files and
//! flipped on read so every coordinate lives in Y-up space.

use crate::chaincode::{Alphabet, ChainCode, Pixel};
use crate::io::configuration::DATASET_HEADER;
use crate::io::error::{NoiseError, Result, WithContext, format_error};
use std::path::Path;
use tracing::info;

/// Parse a whole dataset held in memory
///
/// Blank lines are skipped. Loading is atomic: the first bad record fails
/// the whole batch.
///
/// # Errors
///
/// Returns an error if:
/// - The header line is missing or wrong (`Format`)
/// - A record has fewer than four fields, a bad start pixel, or a walk that
///   leaves the coordinate range (`Format`)
/// - A record names an unknown chain code type (`Format`) or one without
///   tables (`UnsupportedAlphabet`)
/// - A direction is not a digit or is outside the alphabet (`Format`)
pub fn parse_dataset(content: &str) -> Result<Vec<ChainCode>> {
    let mut lines = content.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header.trim_end_matches('\r') == DATASET_HEADER => {}
        Some((_, header)) => {
            return Err(format_error(&format!(
                "expected header '{DATASET_HEADER}', found '{}'",
                header.trim_end_matches('\r')
            )))
            .with_line(1);
        }
        None => return Err(format_error(&"dataset is empty")).with_line(1),
    }

    let mut chain_codes = Vec::new();
    for (index, line) in lines {
        let record = line.trim_end_matches('\r');
        if record.trim().is_empty() {
            continue;
        }
        chain_codes.push(parse_record(record).with_line(index + 1)?);
    }

    let segments: usize = chain_codes.iter().map(ChainCode::len).sum();
    info!(
        chain_codes = chain_codes.len(),
        segments, "Parsed chain code dataset"
    );

    Ok(chain_codes)
}

/// Read and parse a dataset file
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read, otherwise the errors of
/// [`parse_dataset`]
pub fn read_dataset(path: &Path) -> Result<Vec<ChainCode>> {
    let content = std::fs::read_to_string(path).map_err(|e| NoiseError::FileSystem {
        path: path.to_path_buf(),
        operation: "read dataset",
        source: e,
    })?;

    parse_dataset(&content)
}

/// Parse one `type;orientation;x,y;[extra;]directions` record
fn parse_record(record: &str) -> Result<ChainCode> {
    let fields: Vec<&str> = record.split(';').map(str::trim).collect();

    let (kind, start, directions) = match fields.as_slice() {
        [kind, _orientation, start, directions] => (kind, start, directions),
        // Legacy records carry one unused field before the directions
        [kind, _orientation, start, _extra, directions, ..] => (kind, start, directions),
        _ => {
            return Err(format_error(&format!(
                "unterminated record, expected 4 fields but found {}",
                fields.len()
            )));
        }
    };

    let alphabet: Alphabet = kind.parse()?;
    let start = parse_start(start)?;
    ChainCode::from_digits(alphabet, start, directions).map_err(|error| match error {
        NoiseError::InvalidParameter { value, reason, .. } => {
            format_error(&format!("start pixel {value}: {reason}"))
        }
        other => other,
    })
}

fn parse_start(field: &str) -> Result<Pixel> {
    let Some((x, y)) = field.split_once(',') else {
        return Err(format_error(&format!(
            "start pixel '{field}' is not of the form x,y"
        )));
    };

    let parse = |value: &str| {
        value
            .trim()
            .parse::<i32>()
            .map_err(|e| format_error(&format!("bad start coordinate '{value}': {e}")))
    };

    let column = parse(x)?;
    let row = parse(y)?;
    let flipped = row
        .checked_neg()
        .ok_or_else(|| format_error(&format!("start coordinate {row} cannot be flipped to Y-up")))?;

    Ok(Pixel::new(column, flipped))
}
