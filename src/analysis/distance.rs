//! Average nearest-neighbor distance between a noised boundary and its original

use crate::analysis::fractal::fractal_dimension;
use crate::chaincode::geometry::decode;
use crate::chaincode::{ChainCode, Pixel};
use crate::io::error::{NoiseError, Result, invalid_parameter};
use clap::ValueEnum;

/// Pixel distance used when comparing boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DistanceMetric {
    /// `|dx| + |dy|`
    Manhattan,
    /// `sqrt(dx² + dy²)`
    Euclidean,
}

impl DistanceMetric {
    /// Distance between two pixels
    pub fn distance(self, a: Pixel, b: Pixel) -> f64 {
        let [dx, dy] = a.delta_from(b);
        match self {
            Self::Manhattan => f64::from(dx.abs() + dy.abs()),
            Self::Euclidean => f64::from(dx).hypot(f64::from(dy)),
        }
    }
}

/// Pixels visited by a chain code, start included
pub fn rasterize(chain_code: &ChainCode) -> Vec<Pixel> {
    decode(chain_code)
}

/// Mean over the noised pixels of the distance to the closest original pixel
///
/// # Errors
///
/// Returns `EmptyInput` if either rasterization has no pixels
pub fn pointwise_distance(
    chain_code: &ChainCode,
    original: &ChainCode,
    metric: DistanceMetric,
) -> Result<f64> {
    let noised = rasterize(chain_code);
    let reference = rasterize(original);

    if noised.is_empty() || reference.is_empty() {
        return Err(NoiseError::EmptyInput {
            operation: "pointwise_distance",
        });
    }

    let total: f64 = noised
        .iter()
        .map(|&pixel| {
            reference
                .iter()
                .map(|&other| metric.distance(pixel, other))
                .fold(f64::INFINITY, f64::min)
        })
        .sum();

    Ok(total / noised.len() as f64)
}

/// Compares noised batches against the batch they started from
#[derive(Debug, Clone)]
pub struct NoiseAnalyzer {
    originals: Vec<ChainCode>,
}

impl NoiseAnalyzer {
    /// Remember the noise-free chain codes
    pub const fn new(originals: Vec<ChainCode>) -> Self {
        Self { originals }
    }

    /// Noise-free chain codes
    pub fn originals(&self) -> &[ChainCode] {
        &self.originals
    }

    /// [`pointwise_distance`] averaged over every chain code of the batch
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The batch is empty
    /// - The batch size differs from the original batch
    pub fn average_distance(&self, noised: &[ChainCode], metric: DistanceMetric) -> Result<f64> {
        if noised.is_empty() {
            return Err(NoiseError::EmptyInput {
                operation: "average_distance",
            });
        }
        if noised.len() != self.originals.len() {
            return Err(invalid_parameter(
                "noised",
                &noised.len(),
                &format!("expected {} chain codes", self.originals.len()),
            ));
        }

        let total = noised
            .iter()
            .zip(&self.originals)
            .map(|(code, original)| pointwise_distance(code, original, metric))
            .sum::<Result<f64>>()?;

        Ok(total / noised.len() as f64)
    }

    /// Change in [`fractal_dimension`] from the original batch to a noised one
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`fractal_dimension`] for either batch
    pub fn fractal_dimension_change(&self, noised: &[ChainCode]) -> Result<f64> {
        Ok(fractal_dimension(noised)? - fractal_dimension(&self.originals)?)
    }
}
