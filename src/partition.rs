//! Color partitioning: one pass over the grid, grouping pixels by exact color.

use std::collections::{BTreeSet, HashMap};

use crate::error::KvadratError;
use crate::raster::{Color, Coordinate, PixelGrid};

/// Mapping from each color to the set of pixels holding it.
///
/// The coordinate sets partition the source grid: every pixel appears in
/// exactly one set.
#[derive(Clone, Debug, Default)]
pub struct ColorMap {
    colors: HashMap<Color, BTreeSet<Coordinate>>,
}

impl ColorMap {
    /// Partitions a validated grid.
    pub fn from_grid(grid: &PixelGrid) -> Self {
        let mut colors: HashMap<Color, BTreeSet<Coordinate>> = HashMap::new();
        for (coord, color) in grid.iter() {
            colors.entry(color).or_default().insert(coord);
        }
        Self { colors }
    }

    /// Validates raw rows and partitions them.
    ///
    /// # Errors
    /// Fails before any partitioning if the rows are ragged.
    pub fn from_rows(rows: &[Vec<Color>]) -> Result<Self, KvadratError> {
        Ok(Self::from_grid(&PixelGrid::from_rows(rows)?))
    }

    /// Returns the number of distinct colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if no pixels were partitioned.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterates over colors and their pixels in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Color, &BTreeSet<Coordinate>)> {
        self.colors.iter()
    }

    /// Returns the entries sorted by ascending pixel count, ties broken by
    /// color value so the order never depends on hashing.
    pub fn by_pixel_count(&self) -> Vec<(Color, &BTreeSet<Coordinate>)> {
        let mut entries: Vec<_> = self
            .colors
            .iter()
            .map(|(color, coords)| (*color, coords))
            .collect();
        entries.sort_by(|(ca, a), (cb, b)| a.len().cmp(&b.len()).then(ca.cmp(cb)));
        entries
    }
}
