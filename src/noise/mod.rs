//! Noise injection with self-touch prevention
//!
//! This module contains:
//! - The shared boundary-pixel set and the batch session that owns it
//! - The self-touch predicate consulted before every rewrite
//! - The randomized rewriting engine and its run loop

/// Boundary-pixel set and batch session
pub mod boundary;
/// Mutation passes and the iteration loop
pub mod engine;
/// Self-touch validation
pub mod touch;

pub use boundary::{BoundarySet, NoiseSession};
pub use engine::{IterationReport, NoiseConfig, NoiseEngine, PassStats};
