//! Raster georeferencing: geotransform, size and CRS of a raster dataset.

use gdal_sys::CPLErr;

use crate::crs::Crs;
use crate::dataset::Dataset;
use crate::errors::*;
use crate::utils::{_last_cpl_err, _last_null_pointer_err};

/// Affine transformation coefficients of a raster.
///
/// x-coordinate of the top-left corner pixel (x-offset)
/// width of a pixel (x-resolution)
/// row rotation (typically zero)
/// y-coordinate of the top-left corner pixel
/// column rotation (typically zero)
/// height of a pixel (y-resolution, typically negative)
pub type GeoTransform = [f64; 6];

/// Outer edges of a raster in its own CRS.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RasterBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl RasterBounds {
    /// Edges of a north-up raster of `size` pixels. Rotation terms are ignored.
    pub fn from_geo_transform(transform: &GeoTransform, (width, height): (usize, usize)) -> Self {
        let left = transform[0];
        let top = transform[3];
        RasterBounds {
            left,
            top,
            right: left + transform[1] * width as f64,
            bottom: top + transform[5] * height as f64,
        }
    }

    /// The rectangle `(left, top) -> (right, top) -> (right, bottom) -> (left, bottom)`.
    pub fn to_polygon(&self) -> geo_types::Polygon<f64> {
        geo_types::Polygon::new(
            geo_types::LineString::from(vec![
                (self.left, self.top),
                (self.right, self.top),
                (self.right, self.bottom),
                (self.left, self.bottom),
            ]),
            vec![],
        )
    }
}

impl Dataset {
    /// Get affine transformation coefficients.
    ///
    /// Fails with a CPL error when the raster is not georeferenced.
    pub fn geo_transform(&self) -> Result<GeoTransform> {
        let mut transformation = GeoTransform::default();
        let rv = unsafe {
            gdal_sys::GDALGetGeoTransform(self.c_dataset(), transformation.as_mut_ptr())
        };

        // check if the dataset has a GeoTransform
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(transformation)
    }

    /// Raster size as `(cols, rows)`.
    pub fn raster_size(&self) -> (usize, usize) {
        let size_x = unsafe { gdal_sys::GDALGetRasterXSize(self.c_dataset()) } as usize;
        let size_y = unsafe { gdal_sys::GDALGetRasterYSize(self.c_dataset()) } as usize;
        (size_x, size_y)
    }

    /// The raster's CRS. Fails when the raster has none.
    pub fn spatial_ref(&self) -> Result<Crs> {
        let c_srs = unsafe { gdal_sys::GDALGetSpatialRef(self.c_dataset()) };
        if c_srs.is_null() {
            return Err(RegionError::InvalidCrs {
                definition: String::new(),
                msg: _last_null_pointer_err("GDALGetSpatialRef").to_string(),
            });
        }
        unsafe { Crs::from_c_obj(c_srs) }
    }

    pub fn raster_bounds(&self) -> Result<RasterBounds> {
        Ok(RasterBounds::from_geo_transform(
            &self.geo_transform()?,
            self.raster_size(),
        ))
    }
}
