//! Self-touch validation run before every rewrite is committed

use crate::chaincode::geometry::step;
use crate::chaincode::{Alphabet, Direction, Pixel};
use crate::io::configuration::NEIGHBORHOOD_RADIUS;
use crate::io::error::Result;
use crate::noise::boundary::BoundarySet;

/// Check whether walking `candidate` from `start` would bring the boundary
/// into contact with itself
///
/// Every pixel visited by the candidate, except the one reached by its final
/// direction (that pixel is already on the boundary), has its neighborhood
/// inspected: the full 3x3 square for F8, the center and edge neighbors for
/// F4. Any inspected cell that is on the boundary and is not one of the
/// `excluded` pixels (the span's own start, middle and end) is a touch.
///
/// # Errors
///
/// Returns `InvalidDirection` if the candidate contains a direction outside
/// the alphabet
pub fn would_cause_self_touch(
    alphabet: Alphabet,
    start: Pixel,
    candidate: &[Direction],
    boundary: &BoundarySet,
    excluded: &[Pixel; 3],
) -> Result<bool> {
    let Some((_, interior)) = candidate.split_last() else {
        return Ok(false);
    };

    let mut current = start;
    for &direction in interior {
        current = step(alphabet, direction, current)?;

        for dy in -NEIGHBORHOOD_RADIUS..=NEIGHBORHOOD_RADIUS {
            for dx in -NEIGHBORHOOD_RADIUS..=NEIGHBORHOOD_RADIUS {
                if alphabet.skips_neighbor(dx, dy) {
                    continue;
                }

                let cell = current.offset(dx, dy);
                if excluded.contains(&cell) {
                    continue;
                }
                if boundary.contains(cell) {
                    return Ok(true);
                }
            }
        }
    }

    Ok(false)
}
