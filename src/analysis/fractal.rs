use crate::analysis::distance::rasterize;
use crate::chaincode::ChainCode;
use crate::chaincode::geometry::bounding_box;
use crate::io::error::{NoiseError, Result, computation_error};

/// Coarse roughness metric `ln(segments) / ln(longer side)`
///
/// The segment count is summed over the whole batch while the longer side
/// is the larger extent (`max - min`) of the first chain code only. For
/// single-shape datasets the two agree; for multi-shape batches the value is
/// kept comparable with earlier runs rather than corrected.
///
/// # Errors
///
/// Returns an error if:
/// - The batch is empty (`EmptyInput`)
/// - The first chain code spans at most one pixel on both axes, which makes
///   the denominator zero (`Computation`)
pub fn fractal_dimension(chain_codes: &[ChainCode]) -> Result<f64> {
    let first = chain_codes.first().ok_or(NoiseError::EmptyInput {
        operation: "fractal_dimension",
    })?;

    let segment_count: usize = chain_codes.iter().map(ChainCode::len).sum();

    let walk = rasterize(first);
    let bbox = bounding_box(&[walk]).ok_or(NoiseError::EmptyInput {
        operation: "fractal_dimension",
    })?;
    let longer_side = bbox.width().max(bbox.height());

    if longer_side <= 1 {
        return Err(computation_error(
            "fractal_dimension",
            &format!("bounding box side {longer_side} gives a zero logarithm"),
        ));
    }

    Ok((segment_count as f64).ln() / f64::from(longer_side).ln())
}
