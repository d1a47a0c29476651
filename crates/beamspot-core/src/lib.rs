pub mod consts;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod io;
pub mod profile;
pub mod viewport;
pub mod spots;
pub mod dataset;
pub mod config;
pub mod events;
pub mod session;
