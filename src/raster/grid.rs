//! Rectangular pixel grids.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::color::Color;
use crate::error::KvadratError;

/// A pixel position as `(column, row)`.
///
/// Ordering is column-major (x first, then y), which keeps coordinate sets
/// deterministic when iterated.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[inline]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A validated, rectangular grid of colors stored row-major.
///
/// Construction enforces the grid invariants (equal row lengths, four
/// channels per pixel) so that nothing downstream has to re-check them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// Creates a grid with no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a grid from rows of colors.
    ///
    /// # Errors
    /// Returns a validation error if the rows have different lengths.
    pub fn from_rows(rows: &[Vec<Color>]) -> Result<Self, KvadratError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(KvadratError::validation(format!(
                "row {} has {} pixels, expected {}",
                index,
                row.len(),
                width
            )));
        }

        let width = dimension(width, "width")?;
        let height = dimension(rows.len(), "height")?;
        let pixels = rows.iter().flatten().copied().collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a grid from rows of raw channel slices.
    ///
    /// # Errors
    /// Returns a validation error if the rows are ragged or any pixel does
    /// not carry exactly four channels.
    pub fn from_channel_rows(rows: &[Vec<Vec<u8>>]) -> Result<Self, KvadratError> {
        let mut colors = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let mut colored = Vec::with_capacity(row.len());
            for (x, channels) in row.iter().enumerate() {
                let color = Color::from_channels(channels).ok_or_else(|| {
                    KvadratError::validation(format!(
                        "pixel ({}, {}) has {} channels, expected 4",
                        x,
                        y,
                        channels.len()
                    ))
                })?;
                colored.push(color);
            }
            colors.push(colored);
        }
        Self::from_rows(&colors)
    }

    /// Builds a grid from a decoded RGBA image.
    pub fn from_rgba_image(image: &image::RgbaImage) -> Self {
        let pixels = image
            .pixels()
            .map(|p| Color::new(p[0], p[1], p[2], p[3]))
            .collect();
        Self {
            width: image.width(),
            height: image.height(),
            pixels,
        }
    }

    /// Returns the number of columns.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the number of rows.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Returns true if the grid holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Iterates over every pixel with its coordinate, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Color)> + '_ {
        let width = self.width.max(1);
        self.pixels.iter().enumerate().map(move |(index, color)| {
            let x = index as u32 % width;
            let y = index as u32 / width;
            (Coordinate::new(x, y), *color)
        })
    }
}

fn dimension(value: usize, name: &str) -> Result<u32, KvadratError> {
    u32::try_from(value)
        .map_err(|_| KvadratError::validation(format!("grid {} {} does not fit in u32", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::opaque(255, 0, 0);
    const BLUE: Color = Color::opaque(0, 0, 255);

    fn colors(grid: &PixelGrid) -> Vec<Color> {
        grid.iter().map(|(_, color)| color).collect()
    }

    #[test]
    fn from_rows_keeps_dimensions() {
        let grid = PixelGrid::from_rows(&[vec![RED, BLUE, RED], vec![BLUE, RED, BLUE]])
            .expect("rectangular grid");
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.len(), 6);
        assert_eq!(colors(&grid), vec![RED, BLUE, RED, BLUE, RED, BLUE]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = PixelGrid::from_rows(&[vec![RED, BLUE], vec![RED]]).unwrap_err();
        assert!(matches!(err, KvadratError::Validation { .. }));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn wrong_channel_count_is_rejected() {
        let rows = vec![vec![vec![1, 2, 3, 4], vec![1, 2, 3]]];
        let err = PixelGrid::from_channel_rows(&rows).unwrap_err();
        assert!(matches!(err, KvadratError::Validation { .. }));
        assert!(err.to_string().contains("3 channels"));
    }

    #[test]
    fn empty_rows_make_an_empty_grid() {
        let grid = PixelGrid::from_rows(&[]).expect("empty grid");
        assert!(grid.is_empty());
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.height(), 0);
        assert_eq!(grid.iter().count(), 0);
    }

    #[test]
    fn iter_visits_rows_in_order() {
        let grid = PixelGrid::from_rows(&[vec![RED, BLUE], vec![BLUE, RED]]).unwrap();
        let coords: Vec<_> = grid.iter().map(|(c, _)| (c.x, c.y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn from_rgba_image_reads_every_channel() {
        let mut image = image::RgbaImage::new(2, 1);
        image.put_pixel(1, 0, image::Rgba([1, 2, 3, 4]));
        let grid = PixelGrid::from_rgba_image(&image);
        assert_eq!(
            colors(&grid),
            vec![Color::new(0, 0, 0, 0), Color::new(1, 2, 3, 4)]
        );
    }
}
