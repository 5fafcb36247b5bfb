//! OGR vector access
//!
//! Just enough of OGR to pull a single geometry out of a datasource and to
//! hand geometries to OGR for parsing, export and set operations.
//!
//! ```no_run
//! use std::path::Path;
//! use georegion::Dataset;
//!
//! let dataset = Dataset::open_vector(Path::new("fixtures/square.geojson")).unwrap();
//! let layer = dataset.layer(0).unwrap();
//! let feature = layer.next_feature().unwrap();
//! let geometry = feature.geometry_by_index(0).unwrap().unwrap();
//! println!("{}", geometry.wkt().unwrap());
//! ```

pub use crate::vector::geometry::Geometry;
pub use crate::vector::layer::{Feature, Layer};
pub use gdal_sys::OGRwkbGeometryType;

use crate::errors::Result;

/// Convert object to a GDAL geometry.
pub trait ToGdal {
    fn to_gdal(&self) -> Result<Geometry>;
}

mod gdal_to_geo;
mod geo_to_gdal;
mod geometry;
mod layer;
mod ops;
