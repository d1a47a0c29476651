pub mod decode;

pub use decode::{decode_grid, load_raster_file};
