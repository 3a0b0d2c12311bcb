//! Rings and regions in pixel space.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::bbox::BoundingBox;
use crate::raster::Coordinate;

/// A vertex in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Lexicographic order: x first, then y.
    #[inline]
    pub fn cmp_xy(&self, other: &Self) -> Ordering {
        self.x.total_cmp(&other.x).then(self.y.total_cmp(&other.y))
    }
}

/// Direction in which a ring is traversed, measured with the shoelace
/// formula (positive signed area is counter-clockwise).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winding {
    CounterClockwise,
    Clockwise,
}

impl Winding {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Winding::CounterClockwise => Winding::Clockwise,
            Winding::Clockwise => Winding::CounterClockwise,
        }
    }
}

/// A closed polygon boundary.
///
/// The closing vertex is implicit: `points` never repeats the first vertex
/// at the end, and never holds two identical consecutive vertices.
/// Non-consecutive repeats are allowed (self-touching boundaries).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    /// Creates a ring, dropping an explicit closing vertex and collapsing
    /// consecutive duplicates.
    pub fn new(mut points: Vec<Point>) -> Self {
        points.dedup();
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self { points }
    }

    /// Creates a ring from `(x, y)` pairs.
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    /// Returns the vertices without the closing point.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the number of vertices (closing point excluded).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the ring has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the vertices followed by the closing point.
    pub fn closed_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().chain(self.points.first()).copied()
    }

    /// Iterates over the edges `(from, to)`, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Shoelace area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        self.edges()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum::<f64>()
            / 2.0
    }

    /// Absolute enclosed area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Returns the winding direction, or `None` for a zero-area ring.
    pub fn winding(&self) -> Option<Winding> {
        let area = self.signed_area();
        if area > 0.0 {
            Some(Winding::CounterClockwise)
        } else if area < 0.0 {
            Some(Winding::Clockwise)
        } else {
            None
        }
    }

    /// Returns the ring traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Returns the ring rotated so it starts at vertex `start`.
    pub fn rotated(&self, start: usize) -> Self {
        let mut points = self.points.clone();
        let len = points.len();
        if len > 0 {
            points.rotate_left(start % len);
        }
        Self { points }
    }

    /// Number of distinct vertices.
    pub fn distinct_len(&self) -> usize {
        let mut sorted = self.points.clone();
        sorted.sort_by(Point::cmp_xy);
        sorted.dedup();
        sorted.len()
    }

    /// True when the ring cannot bound an area.
    pub fn is_degenerate(&self) -> bool {
        self.distinct_len() < 3 || self.signed_area() == 0.0
    }

    /// Returns the ring's extent.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(self.points.iter().map(|p| (p.x, p.y)))
    }

    /// Applies `f` to every coordinate, re-establishing the ring invariants.
    pub fn map_coords(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(
            self.points
                .iter()
                .map(|p| Point::new(f(p.x), f(p.y)))
                .collect(),
        )
    }
}

/// An outer ring plus zero or more holes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Region {
    exterior: Ring,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    interiors: Vec<Ring>,
}

impl Region {
    /// Creates a region from its rings.
    pub fn new(exterior: Ring, interiors: Vec<Ring>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// The unit square covering pixel `coord`.
    pub fn unit_square(coord: Coordinate) -> Self {
        let (x, y) = (coord.x as f64, coord.y as f64);
        Self::new(
            Ring::from_coords(&[(x, y), (x, y + 1.0), (x + 1.0, y + 1.0), (x + 1.0, y)]),
            Vec::new(),
        )
    }

    /// Returns the outer boundary.
    #[inline]
    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    /// Returns the holes.
    #[inline]
    pub fn interiors(&self) -> &[Ring] {
        &self.interiors
    }

    /// Returns true if the region has at least one hole.
    #[inline]
    pub fn has_holes(&self) -> bool {
        !self.interiors.is_empty()
    }

    /// Iterates over the exterior followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    /// Enclosed area: the outer area minus the holes.
    pub fn area(&self) -> f64 {
        self.exterior.area() - self.interiors.iter().map(Ring::area).sum::<f64>()
    }

    /// Returns the region's extent (the extent of its outer ring).
    pub fn bounds(&self) -> BoundingBox {
        self.exterior.bounds()
    }

    /// Applies `f` to every coordinate of every ring, dropping holes that
    /// collapse.
    pub fn map_coords(&self, f: impl Fn(f64) -> f64) -> Self {
        let exterior = self.exterior.map_coords(&f);
        let interiors = self
            .interiors
            .iter()
            .map(|ring| ring.map_coords(&f))
            .filter(|ring| !ring.is_degenerate())
            .collect();
        Self::new(exterior, interiors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring {
        Ring::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn new_strips_closing_point_and_duplicates() {
        let ring = Ring::from_coords(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0),
        ]);
        assert_eq!(ring, square());
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn rotated_wraps_the_start_index() {
        let ring = square();
        assert_eq!(ring.rotated(1).points()[0], Point::new(1.0, 0.0));
        assert_eq!(ring.rotated(6), ring.rotated(2));
        assert_eq!(ring.rotated(4), ring);
        assert!(Ring::new(Vec::new()).rotated(3).is_empty());
    }

    #[test]
    fn non_consecutive_duplicates_are_kept() {
        let ring = Ring::from_coords(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (2.0, 1.0),
            (2.0, 2.0),
            (1.0, 2.0),
            (1.0, 1.0),
            (0.0, 1.0),
        ]);
        assert_eq!(ring.len(), 8);
        assert_eq!(ring.distinct_len(), 7);
        assert_eq!(ring.area(), 2.0);
    }

    #[test]
    fn signed_area_reflects_winding() {
        assert_eq!(square().signed_area(), 1.0);
        assert_eq!(square().winding(), Some(Winding::CounterClockwise));
        assert_eq!(square().reversed().signed_area(), -1.0);
        assert_eq!(square().reversed().winding(), Some(Winding::Clockwise));
    }

    #[test]
    fn unit_square_covers_the_pixel() {
        let region = Region::unit_square(Coordinate::new(5, 5));
        assert_eq!(region.area(), 1.0);
        assert_eq!(region.bounds(), BoundingBox::new(5.0, 5.0, 1.0, 1.0));
        assert_eq!(
            region.exterior().points()[0],
            Point::new(5.0, 5.0)
        );
    }

    #[test]
    fn region_area_subtracts_holes() {
        let outer = Ring::from_coords(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0)]);
        let hole = Ring::from_coords(&[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0)]);
        let region = Region::new(outer, vec![hole]);
        assert!(region.has_holes());
        assert_eq!(region.area(), 8.0);
        assert_eq!(region.rings().count(), 2);
    }

    #[test]
    fn degenerate_rings_are_detected() {
        assert!(Ring::from_coords(&[(0.0, 0.0), (1.0, 0.0)]).is_degenerate());
        assert!(Ring::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]).is_degenerate());
        assert!(!square().is_degenerate());
    }

    #[test]
    fn closed_points_repeat_the_start() {
        let closed: Vec<Point> = square().closed_points().collect();
        assert_eq!(closed.len(), 5);
        assert_eq!(closed.first(), closed.last());
    }
}
