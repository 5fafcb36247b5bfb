use gdal_sys::GDALDatasetH;
use std::ffi::{c_int, c_uint, CString};
use std::path::Path;
use std::ptr::null;
use std::sync::Once;

use crate::errors::*;
use crate::utils::{_last_null_pointer_err, _path_to_c_string, _take_last_error_msg};
use crate::vector::Layer;

// `GDALOpenEx` flags from gdal.h; gdal-sys does not export these macros.
const GDAL_OF_READONLY: c_uint = 0x00;
const GDAL_OF_RASTER: c_uint = 0x02;
const GDAL_OF_VECTOR: c_uint = 0x04;
const GDAL_OF_VERBOSE_ERROR: c_uint = 0x40;

static START: Once = Once::new();

pub fn _register_drivers() {
    START.call_once(|| unsafe {
        gdal_sys::GDALAllRegister();
    });
}

/// A read-only GDAL dataset: a vector datasource or a raster.
#[derive(Debug)]
pub struct Dataset {
    c_dataset: GDALDatasetH,
}

// GDAL Docs state: The returned dataset should only be accessed by one thread at a time.
unsafe impl Send for Dataset {}

impl Drop for Dataset {
    fn drop(&mut self) {
        unsafe {
            gdal_sys::GDALClose(self.c_dataset);
        }
    }
}

impl Dataset {
    /// Opens a vector datasource: a file path or a connection string such as `PG:dbname=gis`.
    pub fn open_vector(path: &Path) -> Result<Dataset> {
        Self::open_ex(path, GDAL_OF_VECTOR | GDAL_OF_READONLY | GDAL_OF_VERBOSE_ERROR)
    }

    pub fn open_raster(path: &Path) -> Result<Dataset> {
        Self::open_ex(path, GDAL_OF_RASTER | GDAL_OF_READONLY | GDAL_OF_VERBOSE_ERROR)
    }

    fn open_ex(path: &Path, open_flags: c_uint) -> Result<Dataset> {
        _register_drivers();
        let c_filename = _path_to_c_string(path)?;
        let c_dataset = unsafe {
            gdal_sys::GDALOpenEx(c_filename.as_ptr(), open_flags, null(), null(), null())
        };
        if c_dataset.is_null() {
            return Err(RegionError::Unreadable {
                path: path.display().to_string(),
                msg: _take_last_error_msg(),
            });
        }
        log::debug!("opened dataset {}", path.display());
        Ok(Dataset { c_dataset })
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_dataset(&self) -> GDALDatasetH {
        self.c_dataset
    }

    pub fn layer(&self, idx: usize) -> Result<Layer<'_>> {
        let c_layer = unsafe { gdal_sys::GDALDatasetGetLayer(self.c_dataset, idx as c_int) };
        if c_layer.is_null() {
            return Err(_last_null_pointer_err("GDALDatasetGetLayer"));
        }
        Ok(unsafe { Layer::from_c_layer(self, c_layer) })
    }

    pub fn layer_by_name(&self, name: &str) -> Result<Layer<'_>> {
        let c_name = CString::new(name)?;
        let c_layer =
            unsafe { gdal_sys::GDALDatasetGetLayerByName(self.c_dataset, c_name.as_ptr()) };
        if c_layer.is_null() {
            return Err(_last_null_pointer_err("GDALDatasetGetLayerByName"));
        }
        Ok(unsafe { Layer::from_c_layer(self, c_layer) })
    }
}
