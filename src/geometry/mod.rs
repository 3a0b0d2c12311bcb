//! Geometric primitives and the polygon-algebra kernel.
//!
//! # Coordinate space
//!
//! All geometry lives in pixel space: pixel `(x, y)` covers the unit square
//! from `(x, y)` to `(x + 1, y + 1)`, with y growing downwards as in the
//! source image. Winding is measured with the shoelace formula on these
//! raw coordinates, so a "counter-clockwise" ring has positive signed area.

mod bbox;
mod kernel;
mod ring;

pub use bbox::BoundingBox;
pub use kernel::{ClipperKernel, GeometryKernel};
pub use ring::{Point, Region, Ring, Winding};
