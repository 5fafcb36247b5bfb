use gdal_sys::CPLErr;
use std::ffi::{c_char, CStr, CString};
use std::path::Path;

use crate::errors::*;

/// Copies a GDAL-owned C string. A null pointer yields an empty string.
pub fn _string(raw_ptr: *const c_char) -> String {
    if raw_ptr.is_null() {
        return String::new();
    }
    let c_str = unsafe { CStr::from_ptr(raw_ptr) };
    c_str.to_string_lossy().into_owned()
}

/// Copies a C string that the caller has to release, then frees it with `VSIFree`.
pub fn _owned_string(raw_ptr: *mut c_char) -> String {
    let value = _string(raw_ptr);
    unsafe { gdal_sys::VSIFree(raw_ptr.cast::<std::ffi::c_void>()) };
    value
}

pub fn _last_cpl_err(cpl_err_class: CPLErr::Type) -> RegionError {
    let last_err_no = unsafe { gdal_sys::CPLGetLastErrorNo() };
    let last_err_msg = _string(unsafe { gdal_sys::CPLGetLastErrorMsg() });
    unsafe { gdal_sys::CPLErrorReset() };
    RegionError::CplError {
        class: cpl_err_class.into(),
        number: last_err_no,
        msg: last_err_msg,
    }
}

pub fn _last_null_pointer_err(method_name: &'static str) -> RegionError {
    RegionError::NullPointer {
        method_name,
        msg: _take_last_error_msg(),
    }
}

/// Returns GDAL's last error message and resets the thread-local error state.
pub fn _take_last_error_msg() -> String {
    let last_err_msg = _string(unsafe { gdal_sys::CPLGetLastErrorMsg() });
    unsafe { gdal_sys::CPLErrorReset() };
    last_err_msg
}

pub fn _path_to_c_string(path: &Path) -> Result<CString> {
    let path_str = path.to_string_lossy();
    CString::new(path_str.as_ref()).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_pointer_reads_as_empty_string() {
        assert_eq!(_string(std::ptr::null()), "");
    }

    #[test]
    fn path_with_nul_is_rejected() {
        let err = _path_to_c_string(Path::new("bad\0path.tif")).unwrap_err();
        assert!(matches!(err, RegionError::FfiNulError(_)));
    }
}
