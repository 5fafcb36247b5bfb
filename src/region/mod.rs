use std::collections::BTreeMap;
use std::fmt;

use geo_types::Polygon;

use crate::crs::Crs;
use crate::errors::*;
use crate::vector::Geometry;

mod document;
mod sources;
mod svg;
mod transforms;

pub use sources::RowLookup;

/// Extra attributes attached to a [`Region`].
pub type Properties = BTreeMap<String, serde_json::Value>;

/// A polygon in a known coordinate reference system, with an optional name
/// and arbitrary extra properties.
///
/// Regions never change once built: every transform returns a new value.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    polygon: Polygon<f64>,
    crs: Crs,
    name: Option<String>,
    properties: Properties,
}

impl Region {
    pub fn new(polygon: Polygon<f64>, crs: Crs, name: Option<String>) -> Region {
        Region {
            polygon,
            crs,
            name,
            properties: Properties::new(),
        }
    }

    /// Builds a region from a polygon and any CRS definition GDAL accepts,
    /// e.g. `EPSG:4326`, WKT, a PROJ string or PROJJSON text.
    pub fn from_polygon(polygon: Polygon<f64>, crs: &str, name: Option<String>) -> Result<Region> {
        Ok(Region::new(polygon, Crs::from_definition(crs)?, name))
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Region {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Region {
        self.properties.extend(properties);
        self
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    /// `[min_x, min_y, max_x, max_y]` of the exterior ring.
    ///
    /// An empty polygon yields infinite bounds with `min > max`.
    pub fn bounds(&self) -> [f64; 4] {
        self.polygon.exterior().coords().fold(
            [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY],
            |[min_x, min_y, max_x, max_y], c| {
                [min_x.min(c.x), min_y.min(c.y), max_x.max(c.x), max_y.max(c.y)]
            },
        )
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region(name={}, crs={})",
            self.name.as_deref().unwrap_or("None"),
            self.crs.name()
        )
    }
}

/// Extracts the polygon of an OGR geometry. A multipolygon is accepted when it
/// has exactly one member.
fn polygon_from_ogr(geometry: &Geometry) -> Result<Polygon<f64>> {
    match geo_types::Geometry::try_from(geometry)? {
        geo_types::Geometry::Polygon(polygon) => Ok(polygon),
        geo_types::Geometry::MultiPolygon(mut multi) if multi.0.len() == 1 => {
            Ok(multi.0.remove(0))
        }
        _ => Err(RegionError::UnsupportedGeometry(geometry.geometry_name())),
    }
}
