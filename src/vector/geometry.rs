use gdal_sys::{OGRErr, OGRGeometryH, OGRwkbGeometryType};
use std::ffi::{c_char, c_int, CString};
use std::fmt::{self, Debug, Formatter};
use std::ptr::null_mut;

use crate::errors::*;
use crate::utils::{_last_null_pointer_err, _owned_string, _string};

/// An owned OGR geometry.
///
/// Used as the hand-off format whenever an operation is delegated to OGR
/// (GeoJSON parsing and export, buffering, set operations).
pub struct Geometry {
    c_geometry: OGRGeometryH,
}

// Each `Geometry` owns a private copy; OGR geometries share no state.
unsafe impl Send for Geometry {}

impl Geometry {
    /// Takes ownership of a geometry created by OGR.
    ///
    /// # Safety
    /// `c_geometry` must be a valid geometry that nothing else will destroy.
    pub unsafe fn with_c_geometry(c_geometry: OGRGeometryH) -> Geometry {
        Geometry { c_geometry }
    }

    /// Copies a geometry owned by someone else, e.g. a feature.
    ///
    /// # Safety
    /// `c_geometry` must be a valid geometry handle.
    pub unsafe fn clone_from_c_geometry(c_geometry: OGRGeometryH) -> Result<Geometry> {
        let c_clone = gdal_sys::OGR_G_Clone(c_geometry);
        if c_clone.is_null() {
            return Err(_last_null_pointer_err("OGR_G_Clone"));
        }
        Ok(Geometry::with_c_geometry(c_clone))
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// The pointer stays owned by `self`.
    pub unsafe fn c_geometry(&self) -> OGRGeometryH {
        self.c_geometry
    }

    /// Create a new, empty geometry of the given type.
    pub fn empty(wkb_type: OGRwkbGeometryType::Type) -> Result<Geometry> {
        let c_geom = unsafe { gdal_sys::OGR_G_CreateGeometry(wkb_type) };
        if c_geom.is_null() {
            return Err(_last_null_pointer_err("OGR_G_CreateGeometry"));
        };
        Ok(unsafe { Geometry::with_c_geometry(c_geom) })
    }

    /// Create a geometry by parsing a
    /// [WKT](https://en.wikipedia.org/wiki/Well-known_text_representation_of_geometry) string.
    pub fn from_wkt(wkt: &str) -> Result<Geometry> {
        let c_wkt = CString::new(wkt)?;
        // OGR_G_CreateFromWkt advances the pointer it is handed
        let mut c_wkt_ptr = c_wkt.as_ptr() as *mut c_char;
        let mut c_geom = null_mut();
        let rv = unsafe { gdal_sys::OGR_G_CreateFromWkt(&mut c_wkt_ptr, null_mut(), &mut c_geom) };
        if rv != OGRErr::OGRERR_NONE {
            return Err(RegionError::OgrError {
                err: rv,
                method_name: "OGR_G_CreateFromWkt",
            });
        }
        Ok(unsafe { Geometry::with_c_geometry(c_geom) })
    }

    /// Create a geometry from a GeoJSON geometry object.
    pub fn from_geojson(json: &str) -> Result<Geometry> {
        let c_json = CString::new(json)?;
        let c_geom = unsafe { gdal_sys::OGR_G_CreateGeometryFromJson(c_json.as_ptr()) };
        if c_geom.is_null() {
            return Err(_last_null_pointer_err("OGR_G_CreateGeometryFromJson"));
        }
        Ok(unsafe { Geometry::with_c_geometry(c_geom) })
    }

    /// Serialize the geometry as a GeoJSON geometry object.
    pub fn json(&self) -> Result<String> {
        let c_json = unsafe { gdal_sys::OGR_G_ExportToJson(self.c_geometry) };
        if c_json.is_null() {
            return Err(_last_null_pointer_err("OGR_G_ExportToJson"));
        };
        Ok(_owned_string(c_json))
    }

    /// Serialize the geometry as WKT.
    pub fn wkt(&self) -> Result<String> {
        let mut c_wkt = null_mut();
        let rv = unsafe { gdal_sys::OGR_G_ExportToWkt(self.c_geometry, &mut c_wkt) };
        let wkt = _owned_string(c_wkt);
        if rv != OGRErr::OGRERR_NONE {
            return Err(RegionError::OgrError {
                err: rv,
                method_name: "OGR_G_ExportToWkt",
            });
        }
        Ok(wkt)
    }

    /// The geometry type with any Z/M flags stripped.
    pub fn geometry_type(&self) -> OGRwkbGeometryType::Type {
        unsafe { gdal_sys::OGR_GT_Flatten(gdal_sys::OGR_G_GetGeometryType(self.c_geometry)) }
    }

    /// The OGR name of the geometry type, e.g. `POLYGON`.
    pub fn geometry_name(&self) -> String {
        _string(unsafe { gdal_sys::OGR_G_GetGeometryName(self.c_geometry) })
    }

    pub fn is_empty(&self) -> bool {
        unsafe { gdal_sys::OGR_G_IsEmpty(self.c_geometry) == 1 }
    }

    /// Sets a vertex of a point, line string or ring.
    pub fn set_point_2d(&mut self, i: usize, (x, y): (f64, f64)) {
        unsafe { gdal_sys::OGR_G_SetPoint_2D(self.c_geometry, i as c_int, x, y) };
    }

    /// Appends `sub` to a polygon or collection, transferring ownership to `self`.
    pub fn add_geometry(&mut self, sub: Geometry) -> Result<()> {
        let sub = std::mem::ManuallyDrop::new(sub);
        let rv = unsafe { gdal_sys::OGR_G_AddGeometryDirectly(self.c_geometry, sub.c_geometry) };
        if rv != OGRErr::OGRERR_NONE {
            // ownership was not taken, so it is still ours to release
            drop(std::mem::ManuallyDrop::into_inner(sub));
            return Err(RegionError::OgrError {
                err: rv,
                method_name: "OGR_G_AddGeometryDirectly",
            });
        }
        Ok(())
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe { gdal_sys::OGR_G_DestroyGeometry(self.c_geometry) };
    }
}

impl Clone for Geometry {
    fn clone(&self) -> Geometry {
        let c_geometry = unsafe { gdal_sys::OGR_G_Clone(self.c_geometry) };
        Geometry { c_geometry }
    }
}

impl Debug for Geometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.wkt() {
            Ok(wkt) => f.write_str(wkt.as_str()),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl PartialEq for Geometry {
    fn eq(&self, other: &Self) -> bool {
        unsafe { gdal_sys::OGR_G_Equals(self.c_geometry, other.c_geometry) != 0 }
    }
}
