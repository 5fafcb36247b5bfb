//! GDAL configuration and error reporting.
//!
//! GDAL reads runtime options (credentials for remote file systems, cache
//! sizes, driver switches) from environment variables or from values set with
//! the functions in this module. Options set here are only visible on the
//! calling thread and override the environment there.
//!
//! ```no_run
//! use georegion::config;
//!
//! // Route GDAL diagnostics through the `log` facade.
//! config::log_gdal_errors();
//!
//! config::set_thread_local_config_option("AZURE_STORAGE_CONNECTION_STRING", "...").unwrap();
//! config::clear_thread_local_config_option("AZURE_STORAGE_CONNECTION_STRING").unwrap();
//! ```

use gdal_sys::{CPLErr, CPLErrorNum, CPLGetErrorHandlerUserData};
use std::ffi::{c_char, c_void, CString};
use std::sync::Mutex;

use crate::errors::{CplErrType, Result};
use crate::utils::_string;

/// Set a GDAL library configuration option with **thread local** scope
pub fn set_thread_local_config_option(key: &str, value: &str) -> Result<()> {
    let c_key = CString::new(key.as_bytes())?;
    let c_val = CString::new(value.as_bytes())?;
    unsafe {
        gdal_sys::CPLSetThreadLocalConfigOption(c_key.as_ptr(), c_val.as_ptr());
    };
    Ok(())
}

/// Get the value of a GDAL library configuration option with **thread local** scope
pub fn get_thread_local_config_option(key: &str, default: &str) -> Result<String> {
    let c_key = CString::new(key.as_bytes())?;
    let c_default = CString::new(default.as_bytes())?;
    let rv = unsafe { gdal_sys::CPLGetThreadLocalConfigOption(c_key.as_ptr(), c_default.as_ptr()) };
    Ok(_string(rv))
}

/// Clear the value of a GDAL library configuration option with **thread local** scope
pub fn clear_thread_local_config_option(key: &str) -> Result<()> {
    let c_key = CString::new(key.as_bytes())?;
    unsafe {
        gdal_sys::CPLSetThreadLocalConfigOption(c_key.as_ptr(), ::std::ptr::null());
    };
    Ok(())
}

/// Sets a thread-local option for the lifetime of the guard and clears it on drop.
pub(crate) struct ThreadLocalOption {
    key: String,
}

impl ThreadLocalOption {
    pub(crate) fn set(key: &str, value: &str) -> Result<Self> {
        set_thread_local_config_option(key, value)?;
        Ok(ThreadLocalOption {
            key: key.to_string(),
        })
    }
}

impl Drop for ThreadLocalOption {
    fn drop(&mut self) {
        // the key was accepted by `set`, so it contains no NUL byte
        let _ = clear_thread_local_config_option(&self.key);
    }
}

type ErrorCallbackType = dyn FnMut(CplErrType, i32, &str) + 'static + Send;
// Double-`Box`ed: the outer box pins the callback's address for GDAL's user data
// pointer, the inner box turns the trait object into a thin pointer.
type PinnedErrorCallback = Box<Box<ErrorCallbackType>>;

static ERROR_CALLBACK: Mutex<Option<PinnedErrorCallback>> = Mutex::new(None);

/// Set a custom error handler for GDAL.
///
/// The callback may be invoked from any thread that calls into GDAL.
pub fn set_error_handler<F>(callback: F)
where
    F: FnMut(CplErrType, i32, &str) + 'static + Send + Sync,
{
    unsafe extern "C" fn error_handler(
        error_type: CPLErr::Type,
        error_num: CPLErrorNum,
        error_msg_ptr: *const c_char,
    ) {
        let error_msg = _string(error_msg_ptr);
        let error_type: CplErrType = error_type.into();

        let callback_raw = CPLGetErrorHandlerUserData();
        let callback: &mut Box<ErrorCallbackType> = &mut *(callback_raw as *mut Box<_>);

        callback(error_type, error_num, &error_msg);
    }

    let mut callback: PinnedErrorCallback = Box::new(Box::new(callback));

    let callback_ref: &mut Box<ErrorCallbackType> = callback.as_mut();

    let mut callback_lock = match ERROR_CALLBACK.lock() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    };

    unsafe {
        gdal_sys::CPLSetErrorHandlerEx(Some(error_handler), callback_ref as *mut _ as *mut c_void);
    };

    callback_lock.replace(callback);
}

/// Remove a custom error handler for GDAL.
pub fn remove_error_handler() {
    let mut callback_lock = match ERROR_CALLBACK.lock() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    };

    unsafe {
        gdal_sys::CPLSetErrorHandler(None);
    };

    callback_lock.take();
}

/// Forwards every GDAL diagnostic to the `log` facade under the `gdal` target.
pub fn log_gdal_errors() {
    set_error_handler(|class, number, msg| {
        log::log!(target: "gdal", class.log_level(), "[{number}] {msg}");
    });
}
