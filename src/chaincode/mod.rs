//! Chain code data model and its geometric decoding
//!
//! This module contains:
//! - The pixel value type and the F4/F8 direction alphabets
//! - Validated chain codes
//! - Geometry utilities (decoding, bounding boxes, framing)
//! - The fixed substitution tables used to perturb direction pairs

/// F4/F8 direction alphabets and their per-alphabet constants
pub mod alphabet;
/// Validated chain code sequences
pub mod code;
/// Decoding, bounding boxes and raster framing
pub mod geometry;
/// Fixed substitution lookup tables
pub mod lookup;
/// Integer pixel coordinates
pub mod pixel;

pub use alphabet::{Alphabet, Direction};
pub use code::ChainCode;
pub use pixel::Pixel;
