//! Shared boundary-pixel set and the batch session that owns it
//!
//! The set is the single authority for self-touch detection: boundaries
//! interact across shapes and across non-adjacent parts of the same shape,
//! so no individual chain code can answer whether a pixel is occupied.

use crate::chaincode::geometry::{Frame, decode, normalize_and_frame, to_boundary_set};
use crate::chaincode::{ChainCode, Pixel};
use crate::io::error::{NoiseError, Result};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Every pixel currently lying on some chain code of the batch
///
/// Pixels are counted once per visit, so a pixel walked by a spur, by a
/// closed contour's start and end, or by two shapes stays occupied until its
/// last visit is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundarySet {
    visits: HashMap<Pixel, usize>,
}

impl BoundarySet {
    /// Build the set by decoding every chain code
    pub fn from_chain_codes(chain_codes: &[ChainCode]) -> Self {
        let walks: Vec<Vec<Pixel>> = chain_codes.iter().map(decode).collect();
        Self::from_coordinates(&walks)
    }

    /// Build the set from already decoded walks
    pub fn from_coordinates<S: AsRef<[Pixel]>>(coordinates: &[S]) -> Self {
        let mut boundary = Self::default();
        for &pixel in coordinates.iter().flat_map(|walk| walk.as_ref()) {
            boundary.insert(pixel);
        }
        boundary
    }

    /// Whether `pixel` lies on some boundary
    pub fn contains(&self, pixel: Pixel) -> bool {
        self.visits.contains_key(&pixel)
    }

    /// Number of walk positions currently on `pixel`
    pub fn visit_count(&self, pixel: Pixel) -> usize {
        self.visits.get(&pixel).copied().unwrap_or_default()
    }

    /// Number of distinct boundary pixels
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Whether no pixel is occupied
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Iterate over the occupied pixels in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &Pixel> + '_ {
        self.visits.keys()
    }

    /// Swap the interior pixels of a rewritten span
    ///
    /// One visit is dropped per removed pixel; a pixel still walked elsewhere
    /// stays occupied.
    pub fn replace_span(&mut self, removed: &[Pixel], added: &[Pixel]) {
        for &pixel in removed {
            self.remove(pixel);
        }
        for &pixel in added {
            self.insert(pixel);
        }
    }

    /// Whether the occupied pixels are exactly the union of the decoded chain codes
    pub fn matches(&self, chain_codes: &[ChainCode]) -> bool {
        let walks: Vec<Vec<Pixel>> = chain_codes.iter().map(decode).collect();
        let expected = to_boundary_set(&walks);
        self.len() == expected.len() && expected.iter().all(|&pixel| self.contains(pixel))
    }

    fn insert(&mut self, pixel: Pixel) {
        *self.visits.entry(pixel).or_default() += 1;
    }

    fn remove(&mut self, pixel: Pixel) {
        if let Entry::Occupied(mut entry) = self.visits.entry(pixel) {
            if *entry.get() > 1 {
                *entry.get_mut() -= 1;
            } else {
                entry.remove();
            }
        }
    }
}

/// One batch of chain codes processed together, plus their shared boundary set
///
/// The session is created once per batch and handed to the engine by
/// mutable reference; the boundary set is never rebuilt mid-run.
#[derive(Debug, Clone)]
pub struct NoiseSession {
    chain_codes: Vec<ChainCode>,
    boundary: BoundarySet,
}

impl NoiseSession {
    /// Start a session over chain codes in their own coordinate space
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` if `chain_codes` is empty
    pub fn new(chain_codes: Vec<ChainCode>) -> Result<Self> {
        if chain_codes.is_empty() {
            return Err(NoiseError::EmptyInput {
                operation: "noise session",
            });
        }

        let boundary = BoundarySet::from_chain_codes(&chain_codes);
        Ok(Self {
            chain_codes,
            boundary,
        })
    }

    /// Start a session in frame space, the coordinates a renderer draws
    ///
    /// Returns the session together with the frame of the original batch.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` if `chain_codes` is empty
    pub fn framed(chain_codes: Vec<ChainCode>) -> Result<(Self, Frame)> {
        let frame = normalize_and_frame(&chain_codes)?;
        let boundary = BoundarySet::from_coordinates(&frame.coordinates);
        let session = Self {
            chain_codes: frame.rebase(chain_codes),
            boundary,
        };
        Ok((session, frame))
    }

    /// Chain codes in processing order
    pub fn chain_codes(&self) -> &[ChainCode] {
        &self.chain_codes
    }

    /// Shared boundary set
    pub const fn boundary(&self) -> &BoundarySet {
        &self.boundary
    }

    /// Total number of directions across the batch
    pub fn segment_count(&self) -> usize {
        self.chain_codes.iter().map(ChainCode::len).sum()
    }

    /// Split borrow used by the engine to mutate one code against the shared set
    pub(crate) fn parts_mut(&mut self) -> (&mut [ChainCode], &mut BoundarySet) {
        (&mut self.chain_codes, &mut self.boundary)
    }

    /// Give back the chain codes, ending the session
    pub fn into_chain_codes(self) -> Vec<ChainCode> {
        self.chain_codes
    }
}
