//! Metrics quantifying the noise added to a batch of chain codes

/// Nearest-neighbor distances between noised and original boundaries
pub mod distance;
/// Log-log roughness of a boundary
pub mod fractal;

pub use distance::{DistanceMetric, NoiseAnalyzer};
pub use fractal::fractal_dimension;
