//! Canonical ring representation.
//!
//! Douglas-Peucker simplification always keeps the first vertex, so the
//! same outline simplified from two different starting vertices can come
//! out with different vertex counts. To make output independent of how the
//! kernel happened to order its vertices, every ring is normalized (fixed
//! winding, lexicographically smallest start), simplified, and normalized
//! again. [`Canonicalizer::canonicalize_ring`] is the only way to simplify,
//! so the sequence cannot be split up.

use crate::geometry::{GeometryKernel, Point, Region, Ring, Winding};
use crate::number::snap_near_integer;

/// Winding used for outer rings; holes use the opposite direction.
pub const EXTERIOR_WINDING: Winding = Winding::CounterClockwise;

/// Produces canonical regions.
pub struct Canonicalizer<'k, K: GeometryKernel + ?Sized> {
    kernel: &'k K,
    tolerance: f64,
}

impl<'k, K: GeometryKernel + ?Sized> Canonicalizer<'k, K> {
    /// Creates a canonicalizer simplifying with `tolerance`.
    pub fn new(kernel: &'k K, tolerance: f64) -> Self {
        Self { kernel, tolerance }
    }

    /// Orients `ring` and rotates it to start at its smallest vertex.
    pub fn normalize_ring(&self, ring: &Ring, winding: Winding) -> Ring {
        rotate_to_min(&self.kernel.orient(ring, winding))
    }

    /// Normalize, simplify, normalize, then snap float noise to integers.
    pub fn canonicalize_ring(&self, ring: &Ring, winding: Winding) -> Ring {
        let normalized = self.normalize_ring(ring, winding);
        let simplified = self.kernel.simplify(&normalized, self.tolerance);
        let renormalized = self.normalize_ring(&simplified, winding);
        renormalized.map_coords(snap_near_integer)
    }

    /// Canonicalizes every ring of a region.
    ///
    /// Holes are sorted by their first vertex so their order does not
    /// depend on the kernel either.
    pub fn canonicalize(&self, region: &Region) -> Region {
        let exterior = self.canonicalize_ring(region.exterior(), EXTERIOR_WINDING);
        let mut interiors: Vec<Ring> = region
            .interiors()
            .iter()
            .map(|ring| self.canonicalize_ring(ring, EXTERIOR_WINDING.reversed()))
            .collect();
        interiors.sort_by(|a, b| first_point_cmp(a, b));
        Region::new(exterior, interiors)
    }
}

/// Rotates a ring so it starts at the lexicographically smallest `(x, y)`.
///
/// The smallest vertex is never a collinear one, so the start is always a
/// true corner. For repeated vertices the first occurrence wins.
pub fn rotate_to_min(ring: &Ring) -> Ring {
    let start = ring
        .points()
        .iter()
        .enumerate()
        .min_by(|(ia, a), (ib, b)| a.cmp_xy(b).then(ia.cmp(ib)))
        .map(|(index, _)| index)
        .unwrap_or(0);
    ring.rotated(start)
}

fn first_point_cmp(a: &Ring, b: &Ring) -> std::cmp::Ordering {
    let origin = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    let pa = a.points().first().unwrap_or(&origin);
    let pb = b.points().first().unwrap_or(&origin);
    pa.cmp_xy(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ClipperKernel;

    fn rect_with_midpoint() -> Ring {
        // (5, 0) sits on the bottom edge
        Ring::from_coords(&[
            (5.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ])
    }

    #[test]
    fn rotate_to_min_starts_at_smallest_vertex() {
        let rotated = rotate_to_min(&rect_with_midpoint());
        assert_eq!(rotated.points()[0], Point::new(0.0, 0.0));
        assert_eq!(rotated.len(), 5);
    }

    #[test]
    fn canonical_form_drops_midpoint_regardless_of_start() {
        let kernel = ClipperKernel::default();
        let canon = Canonicalizer::new(&kernel, 0.001);
        let ring = canon.canonicalize_ring(&rect_with_midpoint(), Winding::CounterClockwise);
        assert_eq!(
            ring,
            Ring::from_coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
        );
    }

    #[test]
    fn canonical_form_ignores_rotation_and_winding() {
        let kernel = ClipperKernel::default();
        let canon = Canonicalizer::new(&kernel, 0.001);
        let ring = Ring::from_coords(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let expected = canon.canonicalize_ring(&ring, EXTERIOR_WINDING);

        for start in 0..ring.len() {
            let rotated = ring.rotated(start);
            assert_eq!(canon.canonicalize_ring(&rotated, EXTERIOR_WINDING), expected);
            assert_eq!(
                canon.canonicalize_ring(&rotated.reversed(), EXTERIOR_WINDING),
                expected
            );
        }
    }

    #[test]
    fn canonicalization_is_idempotent() {
        let kernel = ClipperKernel::default();
        let canon = Canonicalizer::new(&kernel, 0.001);
        let once = canon.canonicalize_ring(&rect_with_midpoint(), EXTERIOR_WINDING);
        let twice = canon.canonicalize_ring(&once, EXTERIOR_WINDING);
        assert_eq!(once, twice);
    }

    #[test]
    fn holes_get_the_opposite_winding() {
        let kernel = ClipperKernel::default();
        let canon = Canonicalizer::new(&kernel, 0.001);
        let outer = Ring::from_coords(&[(0.0, 0.0), (0.0, 3.0), (3.0, 3.0), (3.0, 0.0)]);
        let hole = Ring::from_coords(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]);
        let region = canon.canonicalize(&Region::new(outer, vec![hole]));

        assert_eq!(region.exterior().winding(), Some(Winding::CounterClockwise));
        assert_eq!(region.interiors()[0].winding(), Some(Winding::Clockwise));
        assert_eq!(region.interiors()[0].points()[0], Point::new(1.0, 1.0));
        assert_eq!(region.area(), 8.0);
    }

    #[test]
    fn near_integers_are_snapped() {
        let kernel = ClipperKernel::default();
        let canon = Canonicalizer::new(&kernel, 0.001);
        let ring = Ring::from_coords(&[
            (0.0, 0.0),
            (1.0000000000002, 0.0),
            (1.0, 0.9999999999998),
            (0.0, 1.0),
        ]);
        assert_eq!(
            canon.canonicalize_ring(&ring, EXTERIOR_WINDING),
            Ring::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
        );
    }
}
