//! Shape selection: picking the most compact element for each region.

use log::trace;

use crate::document::{Attributes, Element, Group, Path, Polygon, Rect};
use crate::error::KvadratError;
use crate::geometry::{GeometryKernel, Point, Region};
use crate::raster::Color;
use crate::svg::element_markup;

/// Slack for comparing edge vectors of canonical (snapped) rings.
const RECT_EPSILON: f64 = 1e-9;

/// Returns true if `region` is an axis-aligned rectangle.
///
/// The region must have no holes and its outer ring exactly four distinct
/// vertices. Opposite edges must be parallel and of equal length, adjacent
/// edges perpendicular, and every edge parallel to an axis.
pub fn is_rect(region: &Region) -> bool {
    if region.has_holes() {
        return false;
    }
    let ring = region.exterior();
    if ring.len() != 4 || ring.distinct_len() != 4 {
        return false;
    }

    let edges: Vec<Point> = ring
        .edges()
        .map(|(a, b)| Point::new(b.x - a.x, b.y - a.y))
        .collect();

    let near = |a: f64, b: f64| (a - b).abs() <= RECT_EPSILON;
    let opposite_match = (0..2).all(|i| {
        let (e, o) = (edges[i], edges[i + 2]);
        near(e.x, -o.x) && near(e.y, -o.y)
    });
    let perpendicular = (0..4).all(|i| {
        let (e, n) = (edges[i], edges[(i + 1) % 4]);
        near(e.x * n.x + e.y * n.y, 0.0)
    });
    let axis_aligned = edges.iter().all(|e| near(e.x, 0.0) != near(e.y, 0.0));

    opposite_match && perpendicular && axis_aligned
}

/// Chooses the output element for each region of a color.
pub struct ShapeSelector<'k, K: GeometryKernel + ?Sized> {
    kernel: &'k K,
}

impl<'k, K: GeometryKernel + ?Sized> ShapeSelector<'k, K> {
    /// Creates a selector; the kernel is used to emit path data.
    pub fn new(kernel: &'k K) -> Self {
        Self { kernel }
    }

    /// Picks the encoding for one canonical region.
    ///
    /// Regions with holes become a path. Otherwise a rectangle is used when
    /// the region is one and its markup is no longer than the polygon's.
    ///
    /// # Errors
    /// Returns [`KvadratError::Geometry`] if the region violates the
    /// chosen element's invariants, and [`KvadratError::Format`] if path
    /// data cannot be normalized.
    pub fn select_region(
        &self,
        region: &Region,
        attributes: Attributes,
    ) -> Result<Element, KvadratError> {
        if region.has_holes() {
            return Ok(Element::Path(Path::from_region(
                region,
                self.kernel,
                attributes,
            )?));
        }

        let polygon = Element::Polygon(Polygon::from_region(region, attributes.clone())?);
        if !is_rect(region) {
            return Ok(polygon);
        }

        let rect = Element::Rect(Rect::from_region(region, attributes)?);
        let rect_len = element_markup(&rect).len();
        let polygon_len = element_markup(&polygon).len();
        trace!(
            "region at {:?}: rect {} bytes, polygon {} bytes",
            region.bounds(),
            rect_len,
            polygon_len
        );
        Ok(if rect_len <= polygon_len { rect } else { polygon })
    }

    /// Builds the element for all regions of one color.
    ///
    /// A single region yields its element directly; several regions yield
    /// one group that carries the fill, with children ordered by area and
    /// then by first vertex. No regions yield no element.
    ///
    /// # Errors
    /// Fails like [`Self::select_region`].
    pub fn select(
        &self,
        regions: &[Region],
        color: Color,
    ) -> Result<Option<Element>, KvadratError> {
        let fill = Attributes::from([("fill".to_string(), color.fill())]);

        match regions {
            [] => Ok(None),
            [region] => self.select_region(region, fill).map(Some),
            _ => {
                let mut ordered: Vec<&Region> = regions.iter().collect();
                ordered.sort_by(|a, b| {
                    a.area().total_cmp(&b.area()).then_with(|| {
                        match (a.exterior().points().first(), b.exterior().points().first()) {
                            (Some(pa), Some(pb)) => pa.cmp_xy(pb),
                            (pa, pb) => pa.is_some().cmp(&pb.is_some()),
                        }
                    })
                });
                let children = ordered
                    .into_iter()
                    .map(|region| self.select_region(region, Attributes::new()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Some(Element::Group(Group::new(children, fill))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoundingBox, ClipperKernel, Ring};
    use crate::raster::Coordinate;

    fn ring_region(coords: &[(f64, f64)]) -> Region {
        Region::new(Ring::from_coords(coords), Vec::new())
    }

    #[test]
    fn unit_square_is_a_rect() {
        assert!(is_rect(&Region::unit_square(Coordinate::new(5, 5))));
        assert!(is_rect(&ring_region(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 2.0)])));
    }

    #[test]
    fn non_rectangles_are_rejected() {
        // L shape
        assert!(!is_rect(&ring_region(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ])));
        // rotated square
        assert!(!is_rect(&ring_region(&[(1.0, 0.0), (2.0, 1.0), (1.0, 2.0), (0.0, 1.0)])));
        // trapezoid
        assert!(!is_rect(&ring_region(&[(0.0, 0.0), (3.0, 0.0), (2.0, 1.0), (1.0, 1.0)])));
        // square with a collinear extra vertex
        assert!(!is_rect(&ring_region(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (0.0, 2.0),
        ])));
    }

    #[test]
    fn regions_with_holes_are_not_rects() {
        let region = Region::new(
            Ring::from_coords(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0)]),
            vec![Ring::from_coords(&[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0)])],
        );
        assert!(!is_rect(&region));
    }

    #[test]
    fn small_coordinates_prefer_polygon() {
        let kernel = ClipperKernel::default();
        let selector = ShapeSelector::new(&kernel);
        let element = selector
            .select_region(&Region::unit_square(Coordinate::new(5, 5)), Attributes::new())
            .unwrap();
        assert!(matches!(element, Element::Polygon(_)));
    }

    #[test]
    fn long_coordinates_prefer_rect() {
        let kernel = ClipperKernel::default();
        let selector = ShapeSelector::new(&kernel);
        let element = selector
            .select_region(&Region::unit_square(Coordinate::new(100, 100)), Attributes::new())
            .unwrap();
        match element {
            Element::Rect(rect) => {
                assert_eq!(rect.bounds(), BoundingBox::new(100.0, 100.0, 1.0, 1.0))
            }
            other => panic!("expected rect, got {:?}", other),
        }
    }

    #[test]
    fn holes_force_a_path() {
        let kernel = ClipperKernel::default();
        let selector = ShapeSelector::new(&kernel);
        let region = Region::new(
            Ring::from_coords(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0)]),
            vec![Ring::from_coords(&[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0)])],
        );
        let element = selector.select_region(&region, Attributes::new()).unwrap();
        assert!(matches!(element, Element::Path(_)));
    }

    #[test]
    fn single_region_carries_fill() {
        let kernel = ClipperKernel::default();
        let selector = ShapeSelector::new(&kernel);
        let element = selector
            .select(
                &[Region::unit_square(Coordinate::new(0, 0))],
                Color::opaque(255, 0, 0),
            )
            .unwrap()
            .unwrap();
        assert_eq!(element.attributes().get("fill").map(String::as_str), Some("red"));
    }

    #[test]
    fn several_regions_become_a_group() {
        let kernel = ClipperKernel::default();
        let selector = ShapeSelector::new(&kernel);
        let big = ring_region(&[(3.0, 3.0), (5.0, 3.0), (5.0, 5.0), (3.0, 5.0)]);
        let small = Region::unit_square(Coordinate::new(0, 0));
        let element = selector
            .select(&[big, small], Color::opaque(0, 0, 0))
            .unwrap()
            .unwrap();

        let Element::Group(group) = element else {
            panic!("expected a group");
        };
        assert_eq!(group.attributes.get("fill").map(String::as_str), Some("#000"));
        assert_eq!(group.children.len(), 2);
        assert_eq!(group.children[0].area(), 1.0);
        assert_eq!(group.children[1].area(), 4.0);
        assert!(group.children.iter().all(|c| c.attributes().is_empty()));
    }

    #[test]
    fn no_regions_no_element() {
        let kernel = ClipperKernel::default();
        let selector = ShapeSelector::new(&kernel);
        assert!(selector.select(&[], Color::opaque(0, 0, 0)).unwrap().is_none());
    }
}
