//! Fixed substitution tables for local boundary perturbation
//!
//! Each table maps an ordered pair `(incoming, outgoing)` of consecutive
//! directions to a replacement walk that leaves the pair's start and end
//! pixels where they were. An empty entry means the pair has no admissible
//! rewrite; for both alphabets these are exactly the reversal pairs.
//!
//! The two tables of an alphabet differ only in how they resolve ties
//! between equally valid rewrites (e.g. bulging left or right of a straight
//! run), and the engine picks one of them at random for every attempt.

use crate::chaincode::alphabet::{Alphabet, Direction};
use crate::io::error::{NoiseError, Result};

type F8Table = [[&'static [Direction]; 8]; 8];
type F4Table = [[&'static [Direction]; 4]; 4];

#[rustfmt::skip]
const F8_PRIMARY: F8Table = [
    [&[1, 7], &[1, 0],    &[2, 0], &[1, 4],    &[],     &[7, 4],    &[6, 0], &[7, 0]],
    [&[0, 1], &[0, 1, 2], &[2, 1], &[2, 2],    &[0, 3], &[],        &[2, 7], &[0, 0]],
    [&[0, 2], &[1, 2],    &[3, 1], &[3, 2],    &[4, 2], &[3, 6],    &[],     &[1, 6]],
    [&[4, 1], &[2, 2],    &[2, 3], &[2, 3, 4], &[4, 3], &[4, 4],    &[2, 5], &[]],
    [&[],     &[3, 0],    &[2, 4], &[3, 4],    &[3, 5], &[5, 4],    &[6, 4], &[5, 0]],
    [&[4, 7], &[],        &[6, 3], &[4, 4],    &[4, 5], &[4, 5, 6], &[6, 5], &[6, 6]],
    [&[0, 6], &[7, 2],    &[],     &[5, 2],    &[4, 6], &[5, 6],    &[5, 7], &[7, 6]],
    [&[0, 7], &[0, 0],    &[6, 1], &[],        &[0, 5], &[6, 6],    &[6, 7], &[6, 7, 0]],
];

#[rustfmt::skip]
const F8_SECONDARY: F8Table = [
    [&[7, 1], &[1, 0],    &[2, 0], &[1, 4],    &[],     &[7, 4],    &[6, 0], &[7, 0]],
    [&[0, 1], &[2, 1, 0], &[2, 1], &[2, 2],    &[0, 3], &[],        &[2, 7], &[0, 0]],
    [&[0, 2], &[1, 2],    &[1, 3], &[3, 2],    &[4, 2], &[3, 6],    &[],     &[1, 6]],
    [&[4, 1], &[2, 2],    &[2, 3], &[4, 3, 2], &[4, 3], &[4, 4],    &[2, 5], &[]],
    [&[],     &[3, 0],    &[2, 4], &[3, 4],    &[5, 3], &[5, 4],    &[6, 4], &[5, 0]],
    [&[4, 7], &[],        &[6, 3], &[4, 4],    &[4, 5], &[6, 5, 4], &[6, 5], &[6, 6]],
    [&[0, 6], &[7, 2],    &[],     &[5, 2],    &[4, 6], &[5, 6],    &[7, 5], &[7, 6]],
    [&[0, 7], &[0, 0],    &[6, 1], &[],        &[0, 5], &[6, 6],    &[6, 7], &[0, 7, 6]],
];

// Straight runs become a one pixel notch; corners flip to the opposite corner
#[rustfmt::skip]
const F4_PRIMARY: F4Table = [
    [&[1, 0, 0, 3], &[1, 0],       &[],           &[3, 0]],
    [&[0, 1],       &[0, 1, 1, 2], &[2, 1],       &[]],
    [&[],           &[1, 2],       &[1, 2, 2, 3], &[3, 2]],
    [&[0, 3],       &[],           &[2, 3],       &[0, 3, 3, 2]],
];

#[rustfmt::skip]
const F4_SECONDARY: F4Table = [
    [&[3, 0, 0, 1], &[1, 0],       &[],           &[3, 0]],
    [&[0, 1],       &[2, 1, 1, 0], &[2, 1],       &[]],
    [&[],           &[1, 2],       &[3, 2, 2, 1], &[3, 2]],
    [&[0, 3],       &[],           &[2, 3],       &[2, 3, 3, 0]],
];

/// Which of an alphabet's two tables to consult
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableSelector {
    /// First table
    Primary,
    /// Second table
    Secondary,
}

impl TableSelector {
    /// Both selectors
    pub const ALL: [Self; 2] = [Self::Primary, Self::Secondary];

    /// Map a fair coin flip to a table
    pub const fn from_coin(heads: bool) -> Self {
        if heads { Self::Primary } else { Self::Secondary }
    }
}

/// Replacement walk for the direction pair `(incoming, outgoing)`
///
/// An empty slice means no rewrite exists for this pair, which is a normal
/// outcome rather than an error.
///
/// # Errors
///
/// Returns `InvalidDirection` if either direction is outside the alphabet
pub fn find_replacement(
    alphabet: Alphabet,
    selector: TableSelector,
    incoming: Direction,
    outgoing: Direction,
) -> Result<&'static [Direction]> {
    for direction in [incoming, outgoing] {
        if !alphabet.is_valid(direction) {
            return Err(NoiseError::InvalidDirection {
                alphabet,
                direction,
            });
        }
    }

    let row = usize::from(incoming);
    let col = usize::from(outgoing);
    let entry = match (alphabet, selector) {
        (Alphabet::F8, TableSelector::Primary) => F8_PRIMARY.get(row).and_then(|r| r.get(col)),
        (Alphabet::F8, TableSelector::Secondary) => F8_SECONDARY.get(row).and_then(|r| r.get(col)),
        (Alphabet::F4, TableSelector::Primary) => F4_PRIMARY.get(row).and_then(|r| r.get(col)),
        (Alphabet::F4, TableSelector::Secondary) => F4_SECONDARY.get(row).and_then(|r| r.get(col)),
    };

    Ok(entry.copied().unwrap_or(&[]))
}
