//! Geometric decoding of chain codes and raster framing
//!
//! All functions are pure. Coordinates stay in the original (possibly
//! negative) Y-up space until [`normalize_and_frame`] translates them into a
//! left/bottom aligned frame for rendering.

use crate::chaincode::alphabet::{Alphabet, Direction};
use crate::chaincode::code::ChainCode;
use crate::chaincode::pixel::Pixel;
use crate::io::configuration::MAX_FRAME_SIDE;
use crate::io::error::{NoiseError, Result, computation_error, invalid_parameter};
use ndarray::Array2;
use std::collections::HashSet;

/// Dense occupancy grid indexed `[y, x]`
pub type PixelField = Array2<bool>;

/// Axis-aligned bounding box of a set of pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// Minimum coordinates (inclusive)
    pub min: Pixel,
    /// Maximum coordinates (inclusive)
    pub max: Pixel,
}

impl BoundingBox {
    /// Horizontal extent `max.x - min.x`
    pub const fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    /// Vertical extent `max.y - min.y`
    pub const fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// Check if a pixel is within the bounds
    pub const fn contains(&self, pixel: Pixel) -> bool {
        pixel.x >= self.min.x
            && pixel.x <= self.max.x
            && pixel.y >= self.min.y
            && pixel.y <= self.max.y
    }

    /// Smallest box containing both boxes
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        self.include(other.min).include(other.max)
    }

    const fn include(mut self, pixel: Pixel) -> Self {
        if pixel.x < self.min.x {
            self.min.x = pixel.x;
        }
        if pixel.x > self.max.x {
            self.max.x = pixel.x;
        }
        if pixel.y < self.min.y {
            self.min.y = pixel.y;
        }
        if pixel.y > self.max.y {
            self.max.y = pixel.y;
        }
        self
    }
}

/// Decoded coordinates of a batch translated into a shared raster frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Pixel walk of each chain code, every point inside `[0, width) x [0, height)`
    pub coordinates: Vec<Vec<Pixel>>,
    /// Frame width, always even
    pub width: u32,
    /// Frame height, always even
    pub height: u32,
}

impl Frame {
    /// First pixel of every walk, in frame coordinates
    pub fn start_pixels(&self) -> Vec<Pixel> {
        self.coordinates
            .iter()
            .filter_map(|walk| walk.first().copied())
            .collect()
    }

    /// Move each chain code's start onto its framed start pixel
    ///
    /// Codes are matched to walks by position; a code without a matching
    /// walk keeps its start.
    pub fn rebase(&self, chain_codes: Vec<ChainCode>) -> Vec<ChainCode> {
        chain_codes
            .into_iter()
            .enumerate()
            .map(|(index, code)| {
                match self.coordinates.get(index).and_then(|walk| walk.first()) {
                    Some(&start) => code.with_start(start),
                    None => code,
                }
            })
            .collect()
    }
}

/// Pixel reached by one step in `direction`
///
/// # Errors
///
/// Returns an error if:
/// - `direction` is outside the alphabet (`InvalidDirection`)
/// - The step leaves the `i32` coordinate range (`Computation`)
pub fn step(alphabet: Alphabet, direction: Direction, pixel: Pixel) -> Result<Pixel> {
    let [dx, dy] = alphabet.offset(direction)?;
    pixel
        .checked_offset(dx, dy)
        .ok_or_else(|| computation_error("step", &format!("{pixel} moved by ({dx}, {dy}) overflows")))
}

/// Walk a bare direction slice from `start`, returning `directions.len() + 1` pixels
///
/// # Errors
///
/// Returns the first error of [`step`]
pub fn trace(alphabet: Alphabet, start: Pixel, directions: &[Direction]) -> Result<Vec<Pixel>> {
    let mut pixels = Vec::with_capacity(directions.len() + 1);
    let mut current = start;
    pixels.push(current);

    for &direction in directions {
        current = step(alphabet, direction, current)?;
        pixels.push(current);
    }

    Ok(pixels)
}

/// Full coordinate sequence of a chain code, start pixel included
pub fn decode(chain_code: &ChainCode) -> Vec<Pixel> {
    let offsets = chain_code.alphabet().offsets();
    let mut pixels = Vec::with_capacity(chain_code.len() + 1);
    let mut current = chain_code.start();
    pixels.push(current);

    // Directions and the reachable coordinate range were validated when the code was built
    for &direction in chain_code.directions() {
        if let Some(&[dx, dy]) = offsets.get(usize::from(direction)) {
            current = current.offset(dx, dy);
        }
        pixels.push(current);
    }

    pixels
}

/// Componentwise min/max over every pixel of every sequence
///
/// Returns `None` when there are no pixels at all.
pub fn bounding_box<S: AsRef<[Pixel]>>(sequences: &[S]) -> Option<BoundingBox> {
    let mut pixels = sequences
        .iter()
        .flat_map(|sequence| sequence.as_ref().iter().copied());
    let first = pixels.next()?;

    Some(pixels.fold(
        BoundingBox {
            min: first,
            max: first,
        },
        BoundingBox::include,
    ))
}

/// Decode a batch and translate it into a frame whose minimum corner is the origin
///
/// Frame sides are `extent + 1` rounded up to the next even value.
///
/// # Errors
///
/// Returns `EmptyInput` if the batch is empty
pub fn normalize_and_frame(chain_codes: &[ChainCode]) -> Result<Frame> {
    let decoded: Vec<Vec<Pixel>> = chain_codes.iter().map(decode).collect();
    let bbox = bounding_box(&decoded).ok_or(NoiseError::EmptyInput {
        operation: "normalize_and_frame",
    })?;

    Ok(frame_within(decoded, bbox))
}

/// Translate decoded walks into the frame spanned by `bbox`
///
/// Walks that share a box share a frame, so several states of a batch can
/// be framed without shifting against each other. Pixels outside `bbox`
/// land outside the frame.
pub fn frame_within(walks: Vec<Vec<Pixel>>, bbox: BoundingBox) -> Frame {
    let coordinates = walks
        .into_iter()
        .map(|walk| {
            walk.into_iter()
                .map(|pixel| Pixel::from(pixel.delta_from(bbox.min)))
                .collect()
        })
        .collect();

    Frame {
        coordinates,
        width: even_side(bbox.width()),
        height: even_side(bbox.height()),
    }
}

// Extent is never negative for a box built by `bounding_box`
const fn even_side(extent: i32) -> u32 {
    let side = extent.unsigned_abs().saturating_add(1);
    side.saturating_add(side % 2)
}

/// Flatten pixel sequences into one set
pub fn to_boundary_set<S: AsRef<[Pixel]>>(sequences: &[S]) -> HashSet<Pixel> {
    sequences
        .iter()
        .flat_map(|sequence| sequence.as_ref().iter().copied())
        .collect()
}

/// Row-major index `grid_size * y + x` of a pixel in a square grid
///
/// Returns `None` if the pixel lies outside `[0, grid_size)` on either axis.
pub fn unique_index(pixel: Pixel, grid_size: usize) -> Option<usize> {
    let x = usize::try_from(pixel.x).ok()?;
    let y = usize::try_from(pixel.y).ok()?;
    (x < grid_size && y < grid_size).then_some(grid_size * y + x)
}

/// Dense square occupancy grid of side `grid_size`
///
/// Pixels outside the grid are ignored.
///
/// # Errors
///
/// Returns `InvalidParameter` if `grid_size` exceeds `MAX_FRAME_SIDE`
pub fn pixel_field(pixels: &[Pixel], grid_size: usize) -> Result<PixelField> {
    if grid_size > MAX_FRAME_SIDE as usize {
        return Err(invalid_parameter(
            "grid_size",
            &grid_size,
            &format!("dense fields are limited to {MAX_FRAME_SIDE} pixels per side"),
        ));
    }

    let mut cells = vec![false; grid_size * grid_size];
    for &pixel in pixels {
        if let Some(cell) = unique_index(pixel, grid_size).and_then(|index| cells.get_mut(index)) {
            *cell = true;
        }
    }

    Array2::from_shape_vec((grid_size, grid_size), cells)
        .map_err(|error| computation_error("pixel_field", &error))
}
