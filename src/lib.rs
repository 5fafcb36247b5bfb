//! Named geographic regions on top of [GDAL](http://gdal.org/).
//!
//! A [`Region`] is a polygon plus a coordinate reference system, an optional
//! name and a bag of extra properties. Regions can be read from vector files,
//! JSON documents, database rows and raster extents, reprojected, buffered
//! and written back out as JSON.
//!
//! ## Use
//!
//! ```no_run
//! use georegion::Region;
//! use geo_types::polygon;
//!
//! let square = polygon![
//!     (x: 0.0, y: 0.0),
//!     (x: 1.0, y: 0.0),
//!     (x: 1.0, y: 1.0),
//!     (x: 0.0, y: 1.0),
//! ];
//! let region = Region::from_polygon(square, "EPSG:4326", Some("square".to_string())).unwrap();
//! assert_eq!(region.bounds(), [0.0, 0.0, 1.0, 1.0]);
//!
//! let utm = region.to_crs_str("EPSG:32631").unwrap();
//! println!("{}", utm.to_json(true).unwrap());
//! ```

#![crate_name = "georegion"]
#![crate_type = "lib"]

pub mod config;
pub mod crs;
mod dataset;
pub mod errors;
pub mod raster;
mod region;
mod utils;
pub mod vector;
pub mod vsi;

#[cfg(test)]
mod test_utils;

pub use crate::crs::{AxisUnit, CoordTransform, Crs};
pub use crate::dataset::Dataset;
pub use crate::errors::{RegionError, Result};
pub use crate::region::{Properties, Region, RowLookup};

/// Pixel size assumed by [`Region::with_pixel_buffer`], in metres.
pub const DEFAULT_PIXEL_SIZE_M: f64 = 10.0;

/// Rough length of one degree of latitude, used to buffer geographic regions.
pub const METERS_PER_DEGREE: f64 = 111_111.0;

/// Segments per quarter circle when buffering.
pub const BUFFER_QUADRANT_SEGMENTS: u32 = 30;

/// Target of [`Region::to_latlon`].
pub const LATLON_CRS: &str = "EPSG:4326";
