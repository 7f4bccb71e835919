use crate::chaincode::alphabet::{Alphabet, Direction};
use crate::chaincode::pixel::Pixel;
use crate::io::configuration::COORDINATE_LIMIT;
use crate::io::error::{NoiseError, Result, format_error, invalid_parameter};
use std::fmt;

/// A boundary encoded as a start pixel plus unit steps
///
/// Pixel `i + 1` of the walk is pixel `i` moved by `directions[i]`. Every
/// direction is valid for the alphabet and the walk stays within
/// `COORDINATE_LIMIT`; constructors reject anything else, so decoding a
/// `ChainCode` never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainCode {
    directions: Vec<Direction>,
    alphabet: Alphabet,
    start: Pixel,
}

impl ChainCode {
    /// Create a chain code from already parsed directions
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A direction is outside the alphabet (`InvalidDirection`)
    /// - The walk could leave the coordinate range (`InvalidParameter`)
    pub fn new(alphabet: Alphabet, start: Pixel, directions: Vec<Direction>) -> Result<Self> {
        if let Some(&direction) = directions.iter().find(|&&d| !alphabet.is_valid(d)) {
            return Err(NoiseError::InvalidDirection {
                alphabet,
                direction,
            });
        }
        check_reach(start, directions.len())?;

        Ok(Self {
            directions,
            alphabet,
            start,
        })
    }

    /// Create a chain code from a string of decimal digits, one per direction
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A character is not a decimal digit (`Format`)
    /// - A digit is outside the alphabet (`InvalidDirection`)
    pub fn from_digits(alphabet: Alphabet, start: Pixel, digits: &str) -> Result<Self> {
        let directions = digits
            .chars()
            .map(|ch| {
                ch.to_digit(10)
                    .map(|digit| digit as Direction)
                    .ok_or_else(|| format_error(&format!("'{ch}' is not a direction digit")))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(alphabet, start, directions)
    }

    /// Re-derive a chain code from a walk of pixels
    ///
    /// Inverse of decoding: the first pixel becomes the start and every
    /// consecutive pair must be exactly one step apart under `alphabet`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `pixels` is empty
    /// - Two consecutive pixels are not one step apart
    /// - The walk could leave the coordinate range
    pub fn from_pixels(alphabet: Alphabet, pixels: &[Pixel]) -> Result<Self> {
        let start = pixels.first().copied().ok_or(NoiseError::EmptyInput {
            operation: "chain code reconstruction",
        })?;
        check_reach(start, pixels.len().saturating_sub(1))?;

        let directions = pixels
            .windows(2)
            .map(|pair| match pair {
                [from, to] => alphabet.direction_of(to.delta_from(*from)).ok_or_else(|| {
                    invalid_parameter(
                        "pixels",
                        &format!("{from} -> {to}"),
                        &format!("consecutive pixels are not one {alphabet} step apart"),
                    )
                }),
                _ => Err(format_error(&"pixel window of unexpected size")),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            directions,
            alphabet,
            start,
        })
    }

    /// Direction sequence
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Alphabet the directions are written in
    pub const fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// First pixel of the walk
    pub const fn start(&self) -> Pixel {
        self.start
    }

    /// Number of directions (segments)
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    /// Whether the code has no directions
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Same code starting at a different pixel
    #[must_use]
    pub fn with_start(self, start: Pixel) -> Self {
        Self { start, ..self }
    }

    // Callers only ever pass directions taken from this code or the substitution tables
    pub(crate) fn replace_directions(&mut self, directions: Vec<Direction>) {
        debug_assert!(directions.iter().all(|&d| self.alphabet.is_valid(d)));
        self.directions = directions;
    }
}

// A unit step moves each coordinate by at most one, so `|start| + len` bounds the walk
fn check_reach(start: Pixel, steps: usize) -> Result<()> {
    let farthest = u64::from(start.x.unsigned_abs().max(start.y.unsigned_abs()))
        .saturating_add(u64::try_from(steps).unwrap_or(u64::MAX));

    if farthest > u64::from(COORDINATE_LIMIT.unsigned_abs()) {
        return Err(invalid_parameter(
            "start",
            &start,
            &format!("a walk of {steps} steps may leave the coordinate range +-{COORDINATE_LIMIT}"),
        ));
    }
    Ok(())
}

impl fmt::Display for ChainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for direction in &self.directions {
            write!(f, "{direction}")?;
        }
        Ok(())
    }
}
