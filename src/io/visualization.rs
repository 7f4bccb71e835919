//! Frame capture and GIF generation for noise runs

use crate::chaincode::geometry::{Frame, bounding_box, decode, frame_within};
use crate::chaincode::{ChainCode, Pixel};
use crate::io::configuration::FINAL_FRAME_HOLD_FACTOR;
use crate::io::error::{NoiseError, Result};
use crate::io::image::{create_parent_dir, render_frame};
use image::{Delay, RgbaImage};
use std::path::Path;

/// Captures the decoded boundaries of a batch after every iteration
///
/// The first recorded state is normally the noise-free batch, so the
/// animation starts from the original shapes. States are kept in the
/// session's coordinates and only framed on export, all against one box, so
/// shapes do not shift between frames when noise grows past the original
/// extent.
#[derive(Debug, Clone, Default)]
pub struct IterationCapture {
    states: Vec<Vec<Vec<Pixel>>>,
}

impl IterationCapture {
    /// Create an empty capture with room for `iterations` states plus the original
    pub fn with_capacity(iterations: usize) -> Self {
        Self {
            states: Vec::with_capacity(iterations + 1),
        }
    }

    /// Record the state of the batch
    pub fn record(&mut self, chain_codes: &[ChainCode]) {
        self.states.push(chain_codes.iter().map(decode).collect());
    }

    /// Number of recorded states
    pub const fn frame_count(&self) -> usize {
        self.states.len()
    }

    /// Every recorded state framed in the box spanning all of them
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` if nothing with at least one pixel was recorded
    pub fn frames(&self) -> Result<Vec<Frame>> {
        let walks: Vec<&Vec<Pixel>> = self.states.iter().flatten().collect();
        let bbox = bounding_box(&walks).ok_or(NoiseError::EmptyInput {
            operation: "export_gif",
        })?;

        Ok(self
            .states
            .iter()
            .map(|state| frame_within(state.clone(), bbox))
            .collect())
    }

    /// Export the captured states as an animated GIF
    ///
    /// The last frame stays on screen `FINAL_FRAME_HOLD_FACTOR` times longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - A frame is too large to render
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        let rendered = self
            .frames()?
            .iter()
            .map(render_frame)
            .collect::<Result<Vec<RgbaImage>>>()?;

        let last = rendered.len().saturating_sub(1);
        let frames = rendered.into_iter().enumerate().map(|(index, img)| {
            let delay_ms = if index == last {
                frame_delay_ms * FINAL_FRAME_HOLD_FACTOR
            } else {
                frame_delay_ms
            };
            image::Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1))
        });

        create_parent_dir(output_path)?;
        let file = std::fs::File::create(output_path).map_err(|e| NoiseError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .set_repeat(image::codecs::gif::Repeat::Infinite)
            .and_then(|()| encoder.encode_frames(frames))
            .map_err(|e| NoiseError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })
    }
}
