use gdal_sys::{OGRErr, OGRSpatialReferenceH, OSRAxisMappingStrategy};
use std::ffi::{c_char, CString};
use std::fmt;
use std::ptr::{null, null_mut};

use crate::errors::*;
use crate::utils::{_last_null_pointer_err, _owned_string, _string, _take_last_error_msg};

/// Unit of the first axis of a [`Crs`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AxisUnit {
    Metre,
    Degree,
    Other(String),
}

impl AxisUnit {
    fn from_name(name: &str) -> AxisUnit {
        match name.to_ascii_lowercase().as_str() {
            "metre" | "meter" | "m" => AxisUnit::Metre,
            "degree" | "degrees" => AxisUnit::Degree,
            _ => AxisUnit::Other(name.to_string()),
        }
    }
}

impl fmt::Display for AxisUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisUnit::Metre => f.write_str("metre"),
            AxisUnit::Degree => f.write_str("degree"),
            AxisUnit::Other(name) => f.write_str(name),
        }
    }
}

/// A validated OSR spatial reference.
pub struct Crs(OGRSpatialReferenceH);

// OSR handles are reference counted per object; a `Crs` owns its handle exclusively.
unsafe impl Send for Crs {}

impl Drop for Crs {
    fn drop(&mut self) {
        unsafe { gdal_sys::OSRRelease(self.0) };
        self.0 = null_mut();
    }
}

impl Clone for Crs {
    fn clone(&self) -> Crs {
        let n_obj = unsafe { gdal_sys::OSRClone(self.0) };
        let crs = Crs(n_obj);
        crs.use_traditional_axis_order();
        crs
    }
}

impl PartialEq for Crs {
    fn eq(&self, other: &Crs) -> bool {
        unsafe { gdal_sys::OSRIsSame(self.0, other.0) == 1 }
    }
}

impl fmt::Debug for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Crs").field(&self.name()).finish()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Crs {
    /// Parses an inline definition: `AUTH:CODE`, WKT, PROJ strings and PROJJSON text.
    ///
    /// File names and URLs are rejected, the definition is never looked up
    /// on disk or over the network.
    pub fn from_definition(definition: &str) -> Result<Crs> {
        let invalid = |msg: String| RegionError::InvalidCrs {
            definition: definition.to_string(),
            msg,
        };
        if definition.trim().is_empty() {
            return Err(invalid("empty definition".to_string()));
        }
        let c_definition = CString::new(definition)?;
        let c_obj = unsafe { gdal_sys::OSRNewSpatialReference(null()) };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err("OSRNewSpatialReference"));
        }
        let options = [
            c"ALLOW_NETWORK_ACCESS=NO".as_ptr(),
            c"ALLOW_FILE_ACCESS=NO".as_ptr(),
            null(),
        ];
        let rv = unsafe {
            gdal_sys::OSRSetFromUserInputEx(c_obj, c_definition.as_ptr(), options.as_ptr() as _)
        };
        if rv != OGRErr::OGRERR_NONE {
            unsafe { gdal_sys::OSRRelease(c_obj) };
            return Err(invalid(_take_last_error_msg()));
        }
        let crs = Crs(c_obj);
        crs.use_traditional_axis_order();
        Ok(crs)
    }

    pub fn from_epsg(epsg_code: u32) -> Result<Crs> {
        Self::from_definition(&format!("EPSG:{epsg_code}"))
    }

    /// Parses a PROJJSON document, as produced by [`Crs::to_projjson`].
    pub fn from_projjson(projjson: &serde_json::Value) -> Result<Crs> {
        Self::from_definition(&projjson.to_string())
    }

    /// Builds a `Crs` from a borrowed C handle, which is cloned.
    ///
    /// # Safety
    /// `c_obj` must be a valid, non-null `OGRSpatialReferenceH`.
    pub unsafe fn from_c_obj(c_obj: OGRSpatialReferenceH) -> Result<Crs> {
        let mut_c_obj = gdal_sys::OSRClone(c_obj);
        if mut_c_obj.is_null() {
            return Err(_last_null_pointer_err("OSRClone"));
        }
        let crs = Crs(mut_c_obj);
        crs.use_traditional_axis_order();
        Ok(crs)
    }

    fn use_traditional_axis_order(&self) {
        unsafe {
            gdal_sys::OSRSetAxisMappingStrategy(
                self.0,
                OSRAxisMappingStrategy::OAMS_TRADITIONAL_GIS_ORDER,
            )
        };
    }

    /// The CRS name, e.g. `WGS 84` or `WGS 84 / UTM zone 33N`.
    pub fn name(&self) -> String {
        _string(unsafe { gdal_sys::OSRGetName(self.0) })
    }

    pub fn to_proj4(&self) -> Result<String> {
        let mut c_proj4str: *mut c_char = null_mut();
        let rv = unsafe { gdal_sys::OSRExportToProj4(self.0, &mut c_proj4str) };
        let proj4 = _owned_string(c_proj4str);
        if rv != OGRErr::OGRERR_NONE {
            return Err(RegionError::OgrError {
                err: rv,
                method_name: "OSRExportToProj4",
            });
        }
        Ok(proj4.trim().to_string())
    }

    /// Full PROJJSON description of the CRS.
    pub fn to_projjson(&self) -> Result<String> {
        let mut c_json: *mut c_char = null_mut();
        let rv = unsafe { gdal_sys::OSRExportToPROJJSON(self.0, &mut c_json, null()) };
        let json = _owned_string(c_json);
        if rv != OGRErr::OGRERR_NONE {
            return Err(RegionError::OgrError {
                err: rv,
                method_name: "OSRExportToPROJJSON",
            });
        }
        Ok(json)
    }

    /// `AUTHORITY:CODE`, e.g. `EPSG:4326`.
    pub fn authority(&self) -> Result<String> {
        let c_name = unsafe { gdal_sys::OSRGetAuthorityName(self.0, null()) };
        if c_name.is_null() {
            return Err(_last_null_pointer_err("OSRGetAuthorityName"));
        }
        let c_code = unsafe { gdal_sys::OSRGetAuthorityCode(self.0, null()) };
        if c_code.is_null() {
            return Err(_last_null_pointer_err("OSRGetAuthorityCode"));
        }
        Ok(format!("{}:{}", _string(c_name), _string(c_code)))
    }

    /// Short form of the CRS: its authority code when known, the PROJ string otherwise.
    pub fn compact(&self) -> Result<String> {
        self.authority().or_else(|_| self.to_proj4())
    }

    pub fn is_geographic(&self) -> bool {
        unsafe { gdal_sys::OSRIsGeographic(self.0) == 1 }
    }

    /// Unit of the first axis: angular for geographic systems, linear otherwise.
    pub fn axis_unit(&self) -> AxisUnit {
        let mut c_name: *mut c_char = null_mut();
        if self.is_geographic() {
            unsafe { gdal_sys::OSRGetAngularUnits(self.0, &mut c_name) };
        } else {
            unsafe { gdal_sys::OSRGetLinearUnits(self.0, &mut c_name) };
        }
        // owned by the spatial reference, must not be freed
        AxisUnit::from_name(&_string(c_name))
    }

    /// Returns the wrapped C handle.
    ///
    /// # Safety
    /// The handle stays owned by `self`.
    pub unsafe fn to_c_hsrs(&self) -> OGRSpatialReferenceH {
        self.0
    }
}
