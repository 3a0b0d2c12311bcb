//! Region building: turning a color's pixels into merged outlines.
//!
//! Every pixel becomes a unit square and the kernel unions them. A plain
//! union leaves pixels that meet only at a corner (diagonal staircases) as
//! separate pieces, so those pieces are coalesced by growing every square
//! by a tiny epsilon, unioning, and shrinking back.

use std::collections::BTreeSet;

use log::{debug, trace};

use crate::error::KvadratError;
use crate::geometry::{GeometryKernel, Region};
use crate::number::round_to;
use crate::raster::Coordinate;

/// Builds merged regions for one color.
pub struct RegionBuilder<'k, K: GeometryKernel + ?Sized> {
    kernel: &'k K,
    epsilon: f64,
}

impl<'k, K: GeometryKernel + ?Sized> RegionBuilder<'k, K> {
    /// Creates a builder that coalesces pieces closer than `epsilon`.
    pub fn new(kernel: &'k K, epsilon: f64) -> Self {
        Self { kernel, epsilon }
    }

    /// Decimal places that survive the epsilon round trip.
    ///
    /// An epsilon of `1e-6` leaves five trustworthy digits.
    pub fn snap_digits(&self) -> i32 {
        (-(self.epsilon.log10().round() as i32 + 1)).clamp(0, 12)
    }

    /// Converts a set of pixels into disjoint regions.
    ///
    /// Pixels connected through edges or single corners end up in the same
    /// region; zero-area results are dropped.
    ///
    /// # Errors
    /// Propagates kernel failures.
    pub fn build(&self, pixels: &BTreeSet<Coordinate>) -> Result<Vec<Region>, KvadratError> {
        if pixels.is_empty() {
            return Ok(Vec::new());
        }

        let squares: Vec<Region> = pixels.iter().map(|c| Region::unit_square(*c)).collect();
        let plain = self.kernel.union(&squares)?;
        trace!("plain union of {} squares: {} piece(s)", squares.len(), plain.len());

        let regions = if plain.len() > 1 {
            self.coalesce(&squares, plain)?
        } else {
            plain
        };

        Ok(regions
            .into_iter()
            .filter(|region| {
                let keep = region.area() > 0.0;
                if !keep {
                    debug!("dropping zero-area region at {:?}", region.bounds());
                }
                keep
            })
            .collect())
    }

    /// Merges pieces of a plain union that touch at corners.
    fn coalesce(&self, squares: &[Region], plain: Vec<Region>) -> Result<Vec<Region>, KvadratError> {
        let mut grown = Vec::with_capacity(squares.len());
        for square in squares {
            grown.extend(self.kernel.buffer(square, self.epsilon)?);
        }
        let merged = self.kernel.union(&grown)?;

        if merged.len() >= plain.len() {
            // growing connected nothing: the pieces are genuinely disjoint
            return Ok(plain);
        }
        debug!(
            "coalesced {} corner-touching piece(s) into {}",
            plain.len(),
            merged.len()
        );

        let digits = self.snap_digits();
        let mut regions = Vec::with_capacity(merged.len());
        for component in merged {
            // rounding the grown outline removes the epsilon just as well
            let piece = self.shrink_back(&component)?.unwrap_or(component);
            regions.push(piece.map_coords(|v| round_to(v, digits)));
        }
        Ok(regions)
    }

    /// Shrinks a grown component by the epsilon. Returns `None` unless the
    /// result is a single simple region.
    fn shrink_back(&self, component: &Region) -> Result<Option<Region>, KvadratError> {
        let mut shrunk = self.kernel.buffer(component, -self.epsilon)?;
        if shrunk.len() == 1 && self.kernel.is_simple(&shrunk[0]) {
            return Ok(shrunk.pop());
        }
        trace!(
            "shrink gave {} piece(s), snapping the grown outline",
            shrunk.len()
        );
        Ok(None)
    }
}
