mod chunks;
pub mod cli;
pub mod commands;
mod decoder;
pub mod error;
mod filters;
mod image_data;
pub mod logo;
mod pixel;
mod png;
mod raster;
mod utils;

pub use error::{CommandError, Status};
pub use pixel::Pixel;
pub use png::PNG;
pub use raster::IndexedImage;
