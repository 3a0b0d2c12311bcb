//! Conversion report: what a conversion produced.

use serde::Serialize;
use std::fmt;

use crate::document::{Document, Element};
use crate::geometry::BoundingBox;
use crate::number::format_number;
use crate::raster::PixelGrid;

/// A summary of one conversion, printed by `--report`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ConversionReport {
    /// Source grid width in pixels.
    pub width: u32,
    /// Source grid height in pixels.
    pub height: u32,
    /// Number of colors that produced at least one shape.
    pub colors: usize,
    /// Counts of emitted elements by kind.
    pub elements: ElementCounts,
    /// The document viewport.
    pub viewport: BoundingBox,
}

/// Counts of emitted elements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ElementCounts {
    pub rects: usize,
    pub polygons: usize,
    pub paths: usize,
    pub groups: usize,
}

impl ElementCounts {
    /// Number of shapes, i.e. every element except groups.
    pub fn shapes(&self) -> usize {
        self.rects + self.polygons + self.paths
    }

    fn tally(&mut self, element: &Element) {
        match element {
            Element::Group(group) => {
                self.groups += 1;
                for child in &group.children {
                    self.tally(child);
                }
            }
            Element::Polygon(_) => self.polygons += 1,
            Element::Rect(_) => self.rects += 1,
            Element::Path(_) => self.paths += 1,
        }
    }
}

impl ConversionReport {
    /// Builds the report for `document` converted from `grid`.
    pub fn new(grid: &PixelGrid, document: &Document) -> Self {
        let mut elements = ElementCounts::default();
        for child in document.children() {
            elements.tally(child);
        }
        Self {
            width: grid.width(),
            height: grid.height(),
            colors: document.children().len(),
            elements,
            viewport: document.viewport(),
        }
    }

    /// Number of pixels in the source grid.
    pub fn pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {}x{} pixels, {} colors",
            self.width, self.height, self.colors
        )?;
        writeln!(
            f,
            "  {} shapes: {} rects, {} polygons, {} paths",
            self.elements.shapes(),
            self.elements.rects,
            self.elements.polygons,
            self.elements.paths
        )?;
        if self.elements.groups > 0 {
            writeln!(f, "  {} groups", self.elements.groups)?;
        }
        writeln!(
            f,
            "  viewBox: {} {} {} {}",
            format_number(self.viewport.x),
            format_number(self.viewport.y),
            format_number(self.viewport.width),
            format_number(self.viewport.height)
        )
    }
}
