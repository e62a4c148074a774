//! Geometry primitives
//!
//! Points, polygons and 2D affine transforms in double precision.

mod point;
mod polygon;
mod affine;


pub use point::Point2;
pub use polygon::Polygon;
pub use affine::AffineTransform;
