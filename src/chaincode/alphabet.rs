//! Direction alphabets with one table of per-alphabet constants
//!
//! Every piece of alphabet-dependent behavior (step offsets, number of valid
//! directions, which neighborhood cells take part in the self-touch check)
//! is answered here so that decoding and the neighborhood walk stay generic.

use crate::io::configuration::UNSUPPORTED_ALPHABET_TOKENS;
use crate::io::error::{NoiseError, Result, format_error};
use std::fmt;
use std::str::FromStr;

/// A single chain code step
pub type Direction = u8;

/// Unit step offsets for 8-connectivity, counter-clockwise from east
const F8_OFFSETS: [[i32; 2]; 8] = [
    [1, 0],
    [1, 1],
    [0, 1],
    [-1, 1],
    [-1, 0],
    [-1, -1],
    [0, -1],
    [1, -1],
];

/// Unit step offsets for 4-connectivity, counter-clockwise from east
const F4_OFFSETS: [[i32; 2]; 4] = [[1, 0], [0, 1], [-1, 0], [0, -1]];

/// Neighborhood alphabet a chain code is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alphabet {
    /// 4-connected: 0=E, 1=N, 2=W, 3=S
    F4,
    /// 8-connected: 0=E, 1=NE, 2=N, 3=NW, 4=W, 5=SW, 6=S, 7=SE
    F8,
}

impl Alphabet {
    /// Both implemented alphabets
    pub const ALL: [Self; 2] = [Self::F4, Self::F8];

    /// Number of valid directions
    pub const fn direction_count(self) -> u8 {
        match self {
            Self::F4 => 4,
            Self::F8 => 8,
        }
    }

    /// Step offsets indexed by direction
    pub const fn offsets(self) -> &'static [[i32; 2]] {
        match self {
            Self::F4 => &F4_OFFSETS,
            Self::F8 => &F8_OFFSETS,
        }
    }

    /// Whether `direction` belongs to this alphabet
    pub const fn is_valid(self, direction: Direction) -> bool {
        direction < self.direction_count()
    }

    /// Offset `[dx, dy]` of a single step
    ///
    /// # Errors
    ///
    /// Returns `InvalidDirection` if `direction` is outside the alphabet
    pub fn offset(self, direction: Direction) -> Result<[i32; 2]> {
        self.offsets()
            .get(usize::from(direction))
            .copied()
            .ok_or(NoiseError::InvalidDirection {
                alphabet: self,
                direction,
            })
    }

    /// Direction whose step equals `delta`, if any
    pub fn direction_of(self, delta: [i32; 2]) -> Option<Direction> {
        self.offsets()
            .iter()
            .position(|&offset| offset == delta)
            .map(|index| index as Direction)
    }

    /// Whether the neighborhood cell at `(dx, dy)` is left out of the self-touch check
    ///
    /// 4-connected boundaries may legitimately touch diagonally, so only the
    /// center and the edge-adjacent cells are checked for F4.
    pub const fn skips_neighbor(self, dx: i32, dy: i32) -> bool {
        match self {
            Self::F4 => dx != 0 && dy != 0,
            Self::F8 => false,
        }
    }

    /// Token used in dataset files
    pub const fn token(self) -> &'static str {
        match self {
            Self::F4 => "F4",
            Self::F8 => "F8",
        }
    }
}

impl FromStr for Alphabet {
    type Err = NoiseError;

    fn from_str(token: &str) -> Result<Self> {
        match token.trim() {
            "F4" => Ok(Self::F4),
            "F8" => Ok(Self::F8),
            other if UNSUPPORTED_ALPHABET_TOKENS.contains(&other) => {
                Err(NoiseError::UnsupportedAlphabet {
                    token: other.to_string(),
                })
            }
            other => Err(format_error(&format!("unknown chain code type '{other}'"))),
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
