//! Self-touch free boundary noise for chain-coded shapes
//!
//! Shapes are read as F4 or F8 chain codes and perturbed by repeatedly
//! replacing direction pairs with fixed longer detours. Every candidate detour
//! is checked against a set of all boundary pixels of the batch, so boundaries
//! never come into contact with themselves or with each other.

#![forbid(unsafe_code)]

/// Noise metrics: nearest-neighbor distance and fractal dimension
pub mod analysis;
/// Chain code data model, geometry and substitution tables
pub mod chaincode;
/// Input/output operations and error handling
pub mod io;
/// Noise engine, shared boundary set and self-touch validation
pub mod noise;

pub use io::error::{NoiseError, Result};
