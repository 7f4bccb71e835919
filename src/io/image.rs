//! PNG export of framed boundaries on a white canvas

use crate::chaincode::Pixel;
use crate::chaincode::geometry::{Frame, pixel_field};
use crate::io::configuration::{RENDER_PADDING, RENDER_SCALE};
use crate::io::error::{NoiseError, Result};
use image::{Rgba, RgbaImage};
use std::path::Path;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BOUNDARY: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Image side length, in image pixels, for a frame side of `side` boundary pixels
pub const fn canvas_side(side: u32) -> u32 {
    RENDER_SCALE * (side + 2 * RENDER_PADDING)
}

/// Draw every boundary pixel of a frame as a black block
///
/// The canvas is square with the frame's longer side, so frames of a batch
/// keep their aspect ratio. Rows are flipped: frame `y = 0` is the bottom
/// row of the image.
///
/// # Errors
///
/// Returns `InvalidParameter` if the frame is wider or taller than
/// `MAX_FRAME_SIDE`
pub fn render_frame(frame: &Frame) -> Result<RgbaImage> {
    let grid = frame.width.max(frame.height);
    let pixels: Vec<Pixel> = frame.coordinates.iter().flatten().copied().collect();
    let field = pixel_field(&pixels, grid as usize)?;

    let side = canvas_side(grid);
    let mut img = RgbaImage::from_pixel(side, side, BACKGROUND);

    for ((y, x), &occupied) in field.indexed_iter() {
        if !occupied {
            continue;
        }
        // The field is at most MAX_FRAME_SIDE wide, so its indices fit in u32
        let left = (x as u32 + RENDER_PADDING) * RENDER_SCALE;
        let top = (grid - 1 - y as u32 + RENDER_PADDING) * RENDER_SCALE;
        fill_block(&mut img, left, top);
    }

    Ok(img)
}

fn fill_block(img: &mut RgbaImage, left: u32, top: u32) {
    for dy in 0..RENDER_SCALE {
        for dx in 0..RENDER_SCALE {
            if let Some(pixel) = img.get_pixel_mut_checked(left + dx, top + dy) {
                *pixel = BOUNDARY;
            }
        }
    }
}

/// Render a frame and save it as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_frame_as_png(frame: &Frame, output_path: &Path) -> Result<()> {
    create_parent_dir(output_path)?;

    render_frame(frame)?
        .save(output_path)
        .map_err(|e| NoiseError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Make sure the directory an output file goes into exists
///
/// # Errors
///
/// Returns `FileSystem` if the directory cannot be created
pub fn create_parent_dir(output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| NoiseError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}
