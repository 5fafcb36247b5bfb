//! Coordinate reference systems and the transformations between them.
//!
//! Every [`Crs`] built by this crate uses the traditional GIS axis order, so
//! coordinates are always read and written as `(x, y)` / `(lon, lat)` no
//! matter what axis order the authority defines.

mod srs;
mod transform;

pub use srs::{AxisUnit, Crs};
pub use transform::CoordTransform;

#[cfg(test)]
mod tests;
