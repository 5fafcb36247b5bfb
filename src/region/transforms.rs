use super::{polygon_from_ogr, Region};
use crate::crs::{AxisUnit, CoordTransform, Crs};
use crate::errors::*;
use crate::vector::ToGdal;
use crate::{BUFFER_QUADRANT_SEGMENTS, DEFAULT_PIXEL_SIZE_M, LATLON_CRS, METERS_PER_DEGREE};

impl Region {
    /// Grows the region by `pixel_buffer` pixels of [`DEFAULT_PIXEL_SIZE_M`].
    pub fn with_pixel_buffer(&self, pixel_buffer: f64) -> Result<Region> {
        self.with_pixel_buffer_size(pixel_buffer, DEFAULT_PIXEL_SIZE_M)
    }

    /// Grows the region by `pixel_buffer * pixel_size_m` metres.
    ///
    /// For geographic CRS the distance is converted to degrees at
    /// [`METERS_PER_DEGREE`], widened by `1 / cos(min_y)` if that is larger.
    /// `min_y` goes into `cos` unconverted, so this is only a rough bound.
    /// Name and properties are kept.
    ///
    /// A negative buffer that splits the polygon into several parts fails
    /// with [`RegionError::UnsupportedGeometry`].
    pub fn with_pixel_buffer_size(&self, pixel_buffer: f64, pixel_size_m: f64) -> Result<Region> {
        let meters = pixel_buffer * pixel_size_m;
        let distance = match self.crs.axis_unit() {
            AxisUnit::Metre => meters,
            AxisUnit::Degree => {
                let min_y = self.bounds()[1];
                f64::max(
                    meters / METERS_PER_DEGREE,
                    meters / (METERS_PER_DEGREE * min_y.cos()),
                )
            }
            AxisUnit::Other(unit) => return Err(RegionError::UnsupportedUnit(unit)),
        };
        log::trace!("buffering {} by {distance} ({meters} m)", self);

        let buffered = self
            .polygon
            .to_gdal()?
            .buffer(distance, BUFFER_QUADRANT_SEGMENTS)?;
        Ok(Region {
            polygon: polygon_from_ogr(&buffered)?,
            crs: self.crs.clone(),
            name: self.name.clone(),
            properties: self.properties.clone(),
        })
    }

    /// Reprojects every vertex into `target`, in (x, y) axis order.
    ///
    /// The name is kept, properties are not.
    pub fn to_crs(&self, target: &Crs) -> Result<Region> {
        let transform = CoordTransform::new(&self.crs, target)?;
        log::trace!("reprojecting {} to {target}", self);
        let polygon = transform.transform_polygon(&self.polygon)?;
        Ok(Region::new(polygon, target.clone(), self.name.clone()))
    }

    pub fn to_crs_str(&self, target: &str) -> Result<Region> {
        self.to_crs(&Crs::from_definition(target)?)
    }

    pub fn to_latlon(&self) -> Result<Region> {
        self.to_crs_str(LATLON_CRS)
    }

    /// The part of this region not covered by `other`.
    ///
    /// Unlike the other transforms this returns a bare geometry, which may be
    /// empty or a multipolygon. Both regions are assumed to share a CRS.
    pub fn difference(&self, other: &Region) -> Result<geo_types::Geometry<f64>> {
        let diff = self
            .polygon
            .to_gdal()?
            .difference(&other.polygon.to_gdal()?)?;
        geo_types::Geometry::try_from(diff)
    }
}
