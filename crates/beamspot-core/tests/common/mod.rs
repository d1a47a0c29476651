#![allow(dead_code)]

use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, Luma};
use ndarray::Array2;

use beamspot_core::raster::Raster;

/// Gaussian spot of peak `amplitude` centred on `(cx, cy)` = `(col, row)`.
pub fn gaussian_grid(h: usize, w: usize, cx: f64, cy: f64, sigma: f64, amplitude: f32) -> Array2<f32> {
    Array2::from_shape_fn((h, w), |(row, col)| {
        let dx = col as f64 - cx;
        let dy = row as f64 - cy;
        amplitude * (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp() as f32
    })
}

/// Grid whose value is `row * w + col + 1`, so every cell is distinct and nonzero.
pub fn index_grid(h: usize, w: usize) -> Array2<f32> {
    Array2::from_shape_fn((h, w), |(row, col)| (row * w + col + 1) as f32)
}

pub fn oriented(data: Array2<f32>) -> Raster {
    Raster::from_oriented(data, 16).expect("non-empty grid")
}

/// Encode a grid (source row order) as an 8-bit grayscale PNG.
pub fn encode_png_l8(grid: &Array2<f32>) -> Vec<u8> {
    let (h, w) = grid.dim();
    let pixels: Vec<u8> = grid.iter().map(|&v| v.clamp(0.0, 255.0) as u8).collect();
    let img = ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(w as u32, h as u32, pixels)
        .expect("buffer size matches dimensions");
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).expect("encode png");
    out.into_inner()
}

/// Encode a grid (source row order) as a 16-bit grayscale PNG.
pub fn encode_png_l16(grid: &Array2<f32>) -> Vec<u8> {
    let (h, w) = grid.dim();
    let pixels: Vec<u16> = grid.iter().map(|&v| v.clamp(0.0, 65535.0) as u16).collect();
    let img = ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .expect("buffer size matches dimensions");
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).expect("encode png");
    out.into_inner()
}

/// Encode a tiny RGB PNG, which the loader must reject.
pub fn encode_png_rgb(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(w, h, image::Rgb([10, 20, 30]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).expect("encode png");
    out.into_inner()
}
