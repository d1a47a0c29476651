use std::path::Path;

use image::{DynamicImage, Luma, Primitive};
use ndarray::Array2;
use num_traits::AsPrimitive;
use tracing::debug;

use crate::error::{BeamspotError, Result};
use crate::raster::Raster;

/// Decode PNG/BMP/TIFF bytes into a single-channel grid in source row order.
///
/// Returns the grid and the bit depth of the source. Multi-channel rasters are
/// rejected rather than collapsed to luminance; an RGB raster whose channels
/// agree everywhere (a grayscale-palette BMP) counts as single-channel.
pub fn decode_grid(bytes: &[u8]) -> Result<(Array2<f32>, u8)> {
    let img = image::load_from_memory(bytes).map_err(|e| BeamspotError::Load(e.to_string()))?;
    debug!(color = ?img.color(), width = img.width(), height = img.height(), "Decoded raster");

    match img {
        DynamicImage::ImageLuma8(buf) => Ok((luma_to_grid(&buf)?, 8)),
        DynamicImage::ImageLuma16(buf) => Ok((luma_to_grid(&buf)?, 16)),
        DynamicImage::ImageRgb8(buf) if is_gray(&buf) => {
            let red = image::GrayImage::from_fn(buf.width(), buf.height(), |x, y| {
                Luma([buf.get_pixel(x, y).0[0]])
            });
            Ok((luma_to_grid(&red)?, 8))
        }
        other => Err(BeamspotError::Load(format!(
            "expected a single-channel raster, got {:?}",
            other.color()
        ))),
    }
}

/// Read a raster file from disk and orient it.
pub fn load_raster_file(path: &Path) -> Result<Raster> {
    let bytes = std::fs::read(path)?;
    let (grid, bit_depth) = decode_grid(&bytes)?;
    Raster::from_source(grid, bit_depth)
}

fn is_gray(buf: &image::RgbImage) -> bool {
    buf.pixels().all(|p| p.0[0] == p.0[1] && p.0[1] == p.0[2])
}

fn luma_to_grid<T>(buf: &image::ImageBuffer<Luma<T>, Vec<T>>) -> Result<Array2<f32>>
where
    T: Primitive + AsPrimitive<f32>,
{
    let (w, h) = buf.dimensions();
    if w == 0 || h == 0 {
        return Err(BeamspotError::Load(format!("empty raster ({w}x{h})")));
    }
    let values: Vec<f32> = buf.as_raw().iter().map(|&v| v.as_()).collect();
    Array2::from_shape_vec((h as usize, w as usize), values)
        .map_err(|e| BeamspotError::Load(e.to_string()))
}
