//! The geometry kernel: polygon algebra consumed by the pipeline.
//!
//! The pipeline only talks to [`GeometryKernel`]. The production
//! implementation, [`ClipperKernel`], runs boolean operations and offsets
//! through Clipper on a fixed-point integer grid (`geo-clipper`) and uses
//! `geo` for simplification, orientation and intersection tests.

use geo::sweep::Intersections;
use geo::{BoundingRect, Coord, Line, LineIntersection, LineString, MultiPolygon, Polygon, Simplify};
use geo_clipper::{ClipperInt, EndType, JoinType};
use log::trace;

use super::bbox::BoundingBox;
use super::ring::{Point, Region, Ring, Winding};
use crate::error::KvadratError;

/// Polygon algebra needed by the vectorization pipeline.
///
/// Implementations must be deterministic: identical input must always give
/// identical output, because canonical forms are compared for equality.
pub trait GeometryKernel: Send + Sync {
    /// Merges possibly-overlapping polygons into a minimal covering set of
    /// disjoint regions.
    fn union(&self, regions: &[Region]) -> Result<Vec<Region>, KvadratError>;

    /// Grows (`distance > 0`) or shrinks (`distance < 0`) a region's
    /// boundary. Shrinking may split a region or make it vanish.
    fn buffer(&self, region: &Region, distance: f64) -> Result<Vec<Region>, KvadratError>;

    /// Removes vertices whose perpendicular deviation is within
    /// `tolerance`. The first vertex is always kept, so the result depends
    /// on where the ring starts.
    fn simplify(&self, ring: &Ring, tolerance: f64) -> Ring;

    /// Returns the ring traversed in `winding` direction.
    fn orient(&self, ring: &Ring, winding: Winding) -> Ring;

    /// True if no two edges of the region cross or overlap. Rings may touch
    /// themselves or each other at isolated vertices.
    fn is_simple(&self, region: &Region) -> bool;

    /// Returns the extent of a region.
    fn bounds(&self, region: &Region) -> BoundingBox;

    /// Serializes a region as path data, one closed subpath per ring.
    fn path_data(&self, region: &Region) -> String;
}

/// Geometry kernel backed by Clipper (via `geo-clipper`) and `geo`.
///
/// Clipper works on integer coordinates, so pixel-space values are scaled
/// by `scale` on the way in and divided on the way out. The scale must be
/// fine enough to resolve the smallest buffer distance in use.
#[derive(Clone, Copy, Debug)]
pub struct ClipperKernel {
    scale: f64,
}

impl ClipperKernel {
    /// Default fixed-point scale: 1e-7 of a pixel.
    pub const DEFAULT_SCALE: f64 = 1e7;

    /// Largest magnitude Clipper accepts for an integer coordinate.
    const MAX_UNITS: f64 = 4_611_686_018_427_387_903.0;

    /// Miter limit for offsets; pixel outlines only have right angles,
    /// whose miter length is sqrt(2) times the offset.
    const MITER_LIMIT: f64 = 2.0;

    /// Creates a kernel with the given fixed-point scale.
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Returns the fixed-point scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Largest pixel-space coordinate magnitude this kernel can represent.
    pub fn max_extent(&self) -> f64 {
        Self::MAX_UNITS / self.scale
    }

    fn to_units(&self, value: f64) -> Result<i64, KvadratError> {
        let units = (value * self.scale).round();
        if !units.is_finite() || units.abs() > Self::MAX_UNITS {
            return Err(KvadratError::geometry(format!(
                "coordinate {} is outside the kernel range at scale {}",
                value, self.scale
            )));
        }
        Ok(units as i64)
    }

    fn to_clipper_ring(&self, ring: &Ring) -> Result<LineString<i64>, KvadratError> {
        let coords = ring
            .points()
            .iter()
            .map(|p| {
                Ok(Coord {
                    x: self.to_units(p.x)?,
                    y: self.to_units(p.y)?,
                })
            })
            .collect::<Result<Vec<_>, KvadratError>>()?;
        Ok(coords.into())
    }

    fn to_clipper(&self, region: &Region) -> Result<Polygon<i64>, KvadratError> {
        let interiors = region
            .interiors()
            .iter()
            .map(|ring| self.to_clipper_ring(ring))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Polygon::new(self.to_clipper_ring(region.exterior())?, interiors))
    }

    fn from_clipper_ring(&self, ring: &LineString<i64>) -> Ring {
        Ring::new(
            ring.coords()
                .map(|c| Point::new(c.x as f64 / self.scale, c.y as f64 / self.scale))
                .collect(),
        )
    }

    fn from_clipper(&self, polygons: &MultiPolygon<i64>) -> Vec<Region> {
        polygons
            .iter()
            .filter_map(|polygon| {
                let exterior = self.from_clipper_ring(polygon.exterior());
                if exterior.is_degenerate() {
                    trace!("dropping degenerate ring with {} vertices", exterior.len());
                    return None;
                }
                let interiors = polygon
                    .interiors()
                    .iter()
                    .map(|ring| self.from_clipper_ring(ring))
                    .filter(|ring| !ring.is_degenerate())
                    .collect();
                Some(Region::new(exterior, interiors))
            })
            .collect()
    }
}

impl Default for ClipperKernel {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SCALE)
    }
}

fn to_line_string(ring: &Ring) -> LineString<f64> {
    ring.closed_points()
        .map(|p| Coord { x: p.x, y: p.y })
        .collect::<Vec<_>>()
        .into()
}

fn from_line_string(line: &LineString<f64>) -> Ring {
    Ring::new(line.coords().map(|c| Point::new(c.x, c.y)).collect())
}

impl GeometryKernel for ClipperKernel {
    fn union(&self, regions: &[Region]) -> Result<Vec<Region>, KvadratError> {
        if regions.is_empty() {
            return Ok(Vec::new());
        }
        let subject = MultiPolygon::new(
            regions
                .iter()
                .map(|r| self.to_clipper(r))
                .collect::<Result<Vec<_>, _>>()?,
        );
        let merged = subject.union(&MultiPolygon::<i64>::new(Vec::new()));
        Ok(self.from_clipper(&merged))
    }

    fn buffer(&self, region: &Region, distance: f64) -> Result<Vec<Region>, KvadratError> {
        if !distance.is_finite() {
            return Err(KvadratError::geometry(format!(
                "buffer distance must be finite, got {}",
                distance
            )));
        }
        let delta = distance * self.scale;
        if delta.abs() < 1.0 && distance != 0.0 {
            return Err(KvadratError::geometry(format!(
                "buffer distance {} is below the kernel resolution 1/{}",
                distance, self.scale
            )));
        }
        if delta.abs() > Self::MAX_UNITS {
            return Err(KvadratError::geometry(format!(
                "buffer distance {} is outside the kernel range at scale {}",
                distance, self.scale
            )));
        }
        let offset = self.to_clipper(region)?.offset(
            delta,
            JoinType::Miter(Self::MITER_LIMIT),
            EndType::ClosedPolygon,
        );
        Ok(self.from_clipper(&offset))
    }

    fn simplify(&self, ring: &Ring, tolerance: f64) -> Ring {
        let simplified = from_line_string(&to_line_string(ring).simplify(&tolerance));
        if simplified.is_degenerate() {
            // never trade a valid ring for a collapsed one
            return ring.clone();
        }
        simplified
    }

    fn orient(&self, ring: &Ring, winding: Winding) -> Ring {
        use geo::Winding as _;

        let mut line = to_line_string(ring);
        match winding {
            Winding::CounterClockwise => line.make_ccw_winding(),
            Winding::Clockwise => line.make_cw_winding(),
        }
        from_line_string(&line)
    }

    fn is_simple(&self, region: &Region) -> bool {
        if region.rings().any(Ring::is_degenerate) {
            return false;
        }

        let edges = region.rings().flat_map(|ring| {
            ring.edges()
                .map(|(a, b)| Line::new(Coord { x: a.x, y: a.y }, Coord { x: b.x, y: b.y }))
        });
        // sweep-line: only pairs that actually meet are reported
        !Intersections::from_iter(edges).any(|(_, _, intersection)| match intersection {
            LineIntersection::SinglePoint { is_proper, .. } => is_proper,
            LineIntersection::Collinear { intersection } => intersection.start != intersection.end,
        })
    }

    fn bounds(&self, region: &Region) -> BoundingBox {
        match to_line_string(region.exterior()).bounding_rect() {
            Some(rect) => {
                BoundingBox::from_xyxy(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
            }
            None => BoundingBox::ZERO,
        }
    }

    fn path_data(&self, region: &Region) -> String {
        region
            .rings()
            .map(|ring| {
                let mut subpath = String::new();
                for (i, p) in ring.points().iter().enumerate() {
                    subpath.push(if i == 0 { 'M' } else { 'L' });
                    subpath.push_str(&format!("{:?},{:?} ", p.x, p.y));
                }
                subpath.push('z');
                subpath
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
