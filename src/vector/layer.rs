use gdal_sys::{OGRErr, OGRFeatureDefnH, OGRFeatureH, OGRLayerH};
use std::ffi::{c_int, CString};
use std::marker::PhantomData;

use crate::crs::Crs;
use crate::dataset::Dataset;
use crate::errors::*;
use crate::utils::_string;
use crate::vector::Geometry;

/// Layer in a vector dataset
///
/// ```no_run
/// use std::path::Path;
/// use georegion::Dataset;
///
/// let dataset = Dataset::open_vector(Path::new("fixtures/square.geojson")).unwrap();
/// let layer = dataset.layer(0).unwrap();
/// while let Some(feature) = layer.next_feature() {
///     // do something with each feature
/// }
/// ```
#[derive(Debug)]
pub struct Layer<'a> {
    c_layer: OGRLayerH,
    c_defn: OGRFeatureDefnH,
    phantom: PhantomData<&'a Dataset>,
}

impl<'a> Layer<'a> {
    /// Creates a new Layer from a GDAL layer pointer
    ///
    /// # Safety
    /// `c_layer` must belong to `dataset`.
    pub(crate) unsafe fn from_c_layer(_dataset: &'a Dataset, c_layer: OGRLayerH) -> Self {
        let c_defn = gdal_sys::OGR_L_GetLayerDefn(c_layer);
        Layer {
            c_layer,
            c_defn,
            phantom: PhantomData,
        }
    }

    pub fn name(&self) -> String {
        _string(unsafe { gdal_sys::OGR_L_GetName(self.c_layer) })
    }

    /// Number of features matching the current attribute filter.
    ///
    /// Drivers without a fast count scan the whole layer.
    pub fn feature_count(&self) -> i64 {
        unsafe { gdal_sys::OGR_L_GetFeatureCount(self.c_layer, 1) }
    }

    /// Restricts the features returned to those matching `query`, an OGR SQL `WHERE` clause.
    ///
    /// For database drivers the clause is forwarded to the server.
    pub fn set_attribute_filter(&self, query: &str) -> Result<()> {
        let c_str = CString::new(query)?;
        let rv = unsafe { gdal_sys::OGR_L_SetAttributeFilter(self.c_layer, c_str.as_ptr()) };
        if rv != OGRErr::OGRERR_NONE {
            return Err(RegionError::OgrError {
                err: rv,
                method_name: "OGR_L_SetAttributeFilter",
            });
        }
        unsafe { gdal_sys::OGR_L_ResetReading(self.c_layer) };
        Ok(())
    }

    pub fn next_feature(&self) -> Option<Feature<'_>> {
        let c_feature = unsafe { gdal_sys::OGR_L_GetNextFeature(self.c_layer) };
        if c_feature.is_null() {
            None
        } else {
            Some(Feature {
                c_feature,
                phantom: PhantomData,
            })
        }
    }

    pub fn geom_field_count(&self) -> usize {
        (unsafe { gdal_sys::OGR_FD_GetGeomFieldCount(self.c_defn) }) as usize
    }

    pub fn geom_field_name(&self, idx: usize) -> String {
        let c_field = unsafe { gdal_sys::OGR_FD_GetGeomFieldDefn(self.c_defn, idx as c_int) };
        if c_field.is_null() {
            return String::new();
        }
        _string(unsafe { gdal_sys::OGR_GFld_GetNameRef(c_field) })
    }

    pub fn geom_field_index(&self, name: &str) -> Result<Option<usize>> {
        let c_name = CString::new(name)?;
        let idx = unsafe { gdal_sys::OGR_FD_GetGeomFieldIndex(self.c_defn, c_name.as_ptr()) };
        Ok((idx >= 0).then_some(idx as usize))
    }

    /// The CRS of a geometry field, `None` when the field has none.
    pub fn geom_field_crs(&self, idx: usize) -> Result<Option<Crs>> {
        let c_field = unsafe { gdal_sys::OGR_FD_GetGeomFieldDefn(self.c_defn, idx as c_int) };
        if c_field.is_null() {
            return Ok(None);
        }
        let c_srs = unsafe { gdal_sys::OGR_GFld_GetSpatialRef(c_field) };
        if c_srs.is_null() {
            return Ok(None);
        }
        unsafe { Crs::from_c_obj(c_srs) }.map(Some)
    }
}

/// A feature read from a [`Layer`].
pub struct Feature<'a> {
    c_feature: OGRFeatureH,
    phantom: PhantomData<&'a Layer<'a>>,
}

impl Drop for Feature<'_> {
    fn drop(&mut self) {
        unsafe { gdal_sys::OGR_F_Destroy(self.c_feature) };
    }
}

impl Feature<'_> {
    /// A copy of the geometry stored in geometry field `idx`, `None` when unset.
    pub fn geometry_by_index(&self, idx: usize) -> Result<Option<Geometry>> {
        let c_geom = unsafe { gdal_sys::OGR_F_GetGeomFieldRef(self.c_feature, idx as c_int) };
        if c_geom.is_null() {
            return Ok(None);
        }
        unsafe { Geometry::clone_from_c_geometry(c_geom) }.map(Some)
    }

    /// The value of field `name` formatted as a string, `None` when the field is null.
    pub fn field_as_string(&self, name: &str) -> Result<Option<String>> {
        let c_name = CString::new(name)?;
        let field_id = unsafe { gdal_sys::OGR_F_GetFieldIndex(self.c_feature, c_name.as_ptr()) };
        if field_id == -1 {
            return Err(RegionError::InvalidIdentifier(name.to_string()));
        }
        if unsafe { gdal_sys::OGR_F_IsFieldSetAndNotNull(self.c_feature, field_id) } == 0 {
            return Ok(None);
        }
        let rv = unsafe { gdal_sys::OGR_F_GetFieldAsString(self.c_feature, field_id) };
        Ok(Some(_string(rv)))
    }
}
