//! Raster input: colors, coordinates and pixel grids.
//!
//! Decoding is delegated to the `image` crate; everything is converted to
//! 8-bit RGBA before it reaches the geometry pipeline.

mod color;
mod grid;

pub use color::Color;
pub use grid::{Coordinate, PixelGrid};

use std::path::Path;

use crate::error::KvadratError;

/// Decodes an image file into a pixel grid.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
pub fn load_image(path: &Path) -> Result<PixelGrid, KvadratError> {
    let image = image::open(path).map_err(|source| KvadratError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(PixelGrid::from_rgba_image(&image.to_rgba8()))
}

/// Decodes an in-memory image (any format `image` can guess) into a grid.
///
/// # Errors
/// Returns an error if the bytes cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> Result<PixelGrid, KvadratError> {
    let image = image::load_from_memory(bytes).map_err(|source| KvadratError::ImageDecode {
        path: "<stdin>".into(),
        source,
    })?;
    Ok(PixelGrid::from_rgba_image(&image.to_rgba8()))
}
