use gdal_sys::{CPLErr, OGRCoordinateTransformationH};
use geo_types::{Coord, LineString, Polygon};
use std::ffi::c_int;
use std::ptr::null_mut;

use crate::crs::Crs;
use crate::errors::{RegionError, Result};
use crate::utils::{_last_cpl_err, _last_null_pointer_err};

/// Short name of a CRS for error messages.
fn label(crs: &Crs) -> String {
    crs.compact().unwrap_or_else(|_| crs.name())
}

#[derive(Debug)]
/// A coordinate transformation from one [`Crs`] to another, in `(x, y)` axis order.
pub struct CoordTransform {
    inner: OGRCoordinateTransformationH,
    from: Crs,
    to: Crs,
}

impl Drop for CoordTransform {
    fn drop(&mut self) {
        unsafe { gdal_sys::OCTDestroyCoordinateTransformation(self.inner) };
    }
}

impl CoordTransform {
    /// Constructs a new transformation from `source` to `target`.
    ///
    /// See: [OCTNewCoordinateTransformation](https://gdal.org/api/ogr_srs_api.html#_CPPv430OCTNewCoordinateTransformation20OGRSpatialReferenceH20OGRSpatialReferenceH)
    pub fn new(source: &Crs, target: &Crs) -> Result<CoordTransform> {
        let c_obj = unsafe {
            gdal_sys::OCTNewCoordinateTransformation(source.to_c_hsrs(), target.to_c_hsrs())
        };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err("OCTNewCoordinateTransformation"));
        }
        Ok(Self {
            inner: c_obj,
            from: source.clone(),
            to: target.clone(),
        })
    }

    /// Transform 2D coordinates in place.
    ///
    /// See: [OCTTransform](https://gdal.org/api/ogr_srs_api.html#_CPPv412OCTTransform28OGRCoordinateTransformationHiPdPdPd)
    pub fn transform_coords(&self, x: &mut [f64], y: &mut [f64]) -> Result<()> {
        let nb_coords = x.len();
        assert_eq!(
            nb_coords,
            y.len(),
            "transform coordinate slices have different lengths: {} != {}",
            nb_coords,
            y.len()
        );
        let ret_val = unsafe {
            gdal_sys::OCTTransform(
                self.inner,
                nb_coords as c_int,
                x.as_mut_ptr(),
                y.as_mut_ptr(),
                null_mut(),
            ) == 1
        };

        if ret_val {
            Ok(())
        } else {
            let err = _last_cpl_err(CPLErr::CE_Failure);
            let msg = if let RegionError::CplError { msg, .. } = err {
                if msg.trim().is_empty() {
                    None
                } else {
                    Some(msg)
                }
            } else {
                return Err(err);
            };
            Err(RegionError::InvalidCoordinateRange {
                from: label(&self.from),
                to: label(&self.to),
                msg,
            })
        }
    }

    /// Transforms every vertex of `polygon`, keeping its ring structure.
    pub fn transform_polygon(&self, polygon: &Polygon<f64>) -> Result<Polygon<f64>> {
        let exterior = self.transform_ring(polygon.exterior())?;
        let interiors = polygon
            .interiors()
            .iter()
            .map(|ring| self.transform_ring(ring))
            .collect::<Result<Vec<_>>>()?;
        Ok(Polygon::new(exterior, interiors))
    }

    fn transform_ring(&self, ring: &LineString<f64>) -> Result<LineString<f64>> {
        let (mut xs, mut ys): (Vec<f64>, Vec<f64>) = ring.coords().map(|c| (c.x, c.y)).unzip();
        self.transform_coords(&mut xs, &mut ys)?;
        Ok(xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| Coord { x, y })
            .collect())
    }
}
