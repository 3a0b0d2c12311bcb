//! The typed output tree.
//!
//! [`Element`] is a closed set of node kinds; every consumer (bounding-box
//! aggregation, markup writing, reporting) matches on it exhaustively.
//! Bounding boxes are never stored on nodes: leaves derive theirs from
//! their geometry and groups from their children, so a tree can never
//! hold a stale box.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::KvadratError;
use crate::geometry::{BoundingBox, GeometryKernel, Region, Ring};
use crate::path::normalize_path;
use crate::raster::Color;
use crate::shape::is_rect;

/// Attribute name to pre-formatted value.
pub type Attributes = BTreeMap<String, String>;

/// A node of the output tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Element {
    Group(Group),
    Polygon(Polygon),
    Rect(Rect),
    Path(Path),
}

/// Ordered children sharing one set of attributes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Group {
    pub children: Vec<Element>,
    pub attributes: Attributes,
}

/// A single closed ring.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Polygon {
    ring: Ring,
    pub attributes: Attributes,
}

/// An axis-aligned rectangle.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Rect {
    #[serde(flatten)]
    bounds: BoundingBox,
    pub attributes: Attributes,
}

/// A region with holes, drawn as one closed subpath per ring.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Path {
    region: Region,
    data: String,
    pub attributes: Attributes,
}

impl Group {
    /// Creates a group.
    pub fn new(children: Vec<Element>, attributes: Attributes) -> Self {
        Self {
            children,
            attributes,
        }
    }
}

impl Polygon {
    /// Creates a polygon from a region's outer ring.
    ///
    /// # Errors
    /// Returns [`KvadratError::Geometry`] if the region has holes or its
    /// ring cannot bound an area.
    pub fn from_region(region: &Region, attributes: Attributes) -> Result<Self, KvadratError> {
        if region.has_holes() {
            return Err(KvadratError::geometry(format!(
                "polygon cannot carry {} hole(s)",
                region.interiors().len()
            )));
        }
        let ring = region.exterior();
        if ring.is_degenerate() {
            return Err(KvadratError::geometry(format!(
                "polygon ring with {} vertices encloses no area",
                ring.len()
            )));
        }
        Ok(Self {
            ring: ring.clone(),
            attributes,
        })
    }

    /// Returns the polygon's ring.
    pub fn ring(&self) -> &Ring {
        &self.ring
    }
}

impl Rect {
    /// Creates a rectangle covering a rectangular region.
    ///
    /// # Errors
    /// Returns [`KvadratError::Geometry`] if the region is not an
    /// axis-aligned rectangle.
    pub fn from_region(region: &Region, attributes: Attributes) -> Result<Self, KvadratError> {
        if !is_rect(region) {
            return Err(KvadratError::geometry(format!(
                "region at {:?} is not an axis-aligned rectangle",
                region.bounds()
            )));
        }
        Ok(Self {
            bounds: region.bounds(),
            attributes,
        })
    }

    /// Returns the rectangle as a box.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }
}

impl Path {
    /// Creates a path drawing every ring of `region`.
    ///
    /// # Errors
    /// Returns [`KvadratError::Geometry`] for a degenerate outer ring and
    /// [`KvadratError::Format`] if the kernel's path data cannot be parsed.
    pub fn from_region<K: GeometryKernel + ?Sized>(
        region: &Region,
        kernel: &K,
        attributes: Attributes,
    ) -> Result<Self, KvadratError> {
        if region.exterior().is_degenerate() {
            return Err(KvadratError::geometry(format!(
                "path outline with {} vertices encloses no area",
                region.exterior().len()
            )));
        }
        let data = normalize_path(&kernel.path_data(region))?;
        Ok(Self {
            region: region.clone(),
            data,
            attributes,
        })
    }

    /// Returns the region drawn by this path.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Returns the normalized path data.
    pub fn data(&self) -> &str {
        &self.data
    }
}

impl Element {
    /// Returns the element's extent.
    pub fn bbox(&self) -> BoundingBox {
        match self {
            Element::Group(group) => {
                BoundingBox::union_all(group.children.iter().map(Element::bbox))
            }
            Element::Polygon(polygon) => polygon.ring.bounds(),
            Element::Rect(rect) => rect.bounds,
            Element::Path(path) => path.region.bounds(),
        }
    }

    /// Returns the markup tag for this element.
    pub fn tag_name(&self) -> &'static str {
        match self {
            Element::Group(_) => "g",
            Element::Polygon(_) => "polygon",
            Element::Rect(_) => "rect",
            Element::Path(_) => "path",
        }
    }

    /// Returns the element's attributes.
    pub fn attributes(&self) -> &Attributes {
        match self {
            Element::Group(group) => &group.attributes,
            Element::Polygon(polygon) => &polygon.attributes,
            Element::Rect(rect) => &rect.attributes,
            Element::Path(path) => &path.attributes,
        }
    }

    /// Area covered by the element's shapes.
    pub fn area(&self) -> f64 {
        match self {
            Element::Group(group) => group.children.iter().map(Element::area).sum(),
            Element::Polygon(polygon) => polygon.ring.area(),
            Element::Rect(rect) => rect.bounds.area(),
            Element::Path(path) => path.region.area(),
        }
    }
}

/// The root of the output tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Document {
    children: Vec<Element>,
    viewport: BoundingBox,
}

impl Document {
    /// Creates a document whose viewport covers every child.
    pub fn new(children: Vec<Element>) -> Self {
        let viewport = BoundingBox::union_all(children.iter().map(Element::bbox));
        Self { children, viewport }
    }

    /// A document with no children and a zero-sized viewport.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the top-level elements in paint order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Returns the viewport.
    pub fn viewport(&self) -> BoundingBox {
        self.viewport
    }

    /// Returns true if the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// The element produced for one color, with the key it is ordered by.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorLayer {
    pub color: Color,
    pub pixel_count: usize,
    pub element: Element,
}

/// Places per-color elements into a document.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentAssembler;

impl DocumentAssembler {
    /// Orders layers by ascending pixel count (ties broken by color, so
    /// the result never depends on the order layers finished in) and
    /// builds the document. Later elements paint over earlier ones.
    pub fn assemble(&self, mut layers: Vec<ColorLayer>) -> Document {
        layers.sort_by(|a, b| {
            a.pixel_count
                .cmp(&b.pixel_count)
                .then_with(|| a.color.cmp(&b.color))
        });
        Document::new(layers.into_iter().map(|layer| layer.element).collect())
    }
}
