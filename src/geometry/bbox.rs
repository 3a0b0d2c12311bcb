//! Axis-aligned bounding boxes in XYWH form.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box `(x, y, width, height)`.
///
/// Unlike a raw min/max accumulator this type never holds infinite
/// sentinels: the union of nothing is the zero box.
#[derive(Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// The zero-sized box at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a box from XYWH values.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a box from its min and max corners.
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self::new(xmin, ymin, xmax - xmin, ymax - ymin)
    }

    /// Returns the minimum x coordinate.
    #[inline]
    pub fn xmin(&self) -> f64 {
        self.x
    }

    /// Returns the minimum y coordinate.
    #[inline]
    pub fn ymin(&self) -> f64 {
        self.y
    }

    /// Returns the maximum x coordinate.
    #[inline]
    pub fn xmax(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the maximum y coordinate.
    #[inline]
    pub fn ymax(&self) -> f64 {
        self.y + self.height
    }

    /// Returns the area of the box.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns true if all fields are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Returns the smallest box containing both boxes.
    pub fn union(&self, other: &Self) -> Self {
        Self::from_xyxy(
            self.xmin().min(other.xmin()),
            self.ymin().min(other.ymin()),
            self.xmax().max(other.xmax()),
            self.ymax().max(other.ymax()),
        )
    }

    /// Returns the smallest box containing every box, or [`Self::ZERO`]
    /// when there are none.
    pub fn union_all<I>(boxes: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        boxes
            .into_iter()
            .reduce(|acc, bbox| acc.union(&bbox))
            .unwrap_or(Self::ZERO)
    }

    /// Returns the bounding box of a set of points, or [`Self::ZERO`] when
    /// there are none.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let Some((x, y)) = iter.next() else {
            return Self::ZERO;
        };
        let (mut xmin, mut ymin, mut xmax, mut ymax) = (x, y, x, y);
        for (x, y) in iter {
            xmin = xmin.min(x);
            ymin = ymin.min(y);
            xmax = xmax.max(x);
            ymax = ymax.max(y);
        }
        Self::from_xyxy(xmin, ymin, xmax, ymax)
    }
}

impl std::fmt::Debug for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundingBox")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
