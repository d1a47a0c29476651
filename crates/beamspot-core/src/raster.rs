use std::sync::Arc;

use ndarray::{s, Array2};
use tracing::info;

use crate::error::{BeamspotError, Result};
use crate::io::decode::decode_grid;

/// A single-channel intensity grid, shape = (height, width).
///
/// Row 0 is the visual bottom of the source raster: the vertical flip is
/// applied by [`Raster::from_source`] and nowhere else.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    data: Array2<f32>,
    /// Bit depth of the decoded source (8 or 16).
    bit_depth: u8,
}

impl Raster {
    /// Build from a grid in source order (row 0 = top of the file).
    pub fn from_source(source: Array2<f32>, bit_depth: u8) -> Result<Self> {
        let flipped = source.slice(s![..;-1, ..]).to_owned();
        Self::from_oriented(flipped, bit_depth)
    }

    /// Build from a grid that is already bottom-up.
    pub fn from_oriented(data: Array2<f32>, bit_depth: u8) -> Result<Self> {
        let (h, w) = data.dim();
        if h == 0 || w == 0 {
            return Err(BeamspotError::Load(format!("empty raster ({w}x{h})")));
        }
        Ok(Self { data, bit_depth })
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    /// Bounds-checked access.
    pub fn at(&self, row: usize, col: usize) -> Result<f32> {
        self.data
            .get([row, col])
            .copied()
            .ok_or(BeamspotError::OutOfBounds {
                row,
                col,
                height: self.height(),
                width: self.width(),
            })
    }

    /// Access with indices clamped onto the grid edge.
    pub fn at_clamped(&self, row: i64, col: i64) -> f32 {
        let r = row.clamp(0, self.height() as i64 - 1) as usize;
        let c = col.clamp(0, self.width() as i64 - 1) as usize;
        self.data[[r, c]]
    }

    /// `(min, max)` over the whole grid.
    pub fn intensity_range(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

/// Owner of the raster every view and the profile sampler read from.
///
/// The grid is held behind an `Arc` and swapped whole, so a reader holding a
/// snapshot from [`ImageBuffer::current`] keeps a complete grid across a
/// [`ImageBuffer::replace`].
#[derive(Debug)]
pub struct ImageBuffer {
    current: Arc<Raster>,
    generation: u64,
}

impl ImageBuffer {
    pub fn new(raster: Raster) -> Self {
        Self {
            current: Arc::new(raster),
            generation: 0,
        }
    }

    /// Decode raw file bytes into an oriented raster. Does not touch any buffer.
    pub fn load(bytes: &[u8]) -> Result<Raster> {
        let (grid, bit_depth) = decode_grid(bytes)?;
        Raster::from_source(grid, bit_depth)
    }

    /// Swap in a new raster, returning the previous one.
    pub fn replace(&mut self, raster: Raster) -> Arc<Raster> {
        let next = Arc::new(raster);
        self.generation += 1;
        info!(
            width = next.width(),
            height = next.height(),
            generation = self.generation,
            "Raster replaced"
        );
        std::mem::replace(&mut self.current, next)
    }

    /// Decode `bytes` and swap the result in. On failure the buffer is unchanged.
    pub fn load_and_replace(&mut self, bytes: &[u8]) -> Result<Arc<Raster>> {
        let raster = Self::load(bytes)?;
        self.replace(raster);
        Ok(self.current())
    }

    /// Snapshot of the current raster.
    pub fn current(&self) -> Arc<Raster> {
        Arc::clone(&self.current)
    }

    pub fn raster(&self) -> &Raster {
        &self.current
    }

    /// Number of completed swaps since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn width(&self) -> usize {
        self.current.width()
    }

    pub fn height(&self) -> usize {
        self.current.height()
    }

    pub fn at(&self, row: usize, col: usize) -> Result<f32> {
        self.current.at(row, col)
    }
}
