use std::ffi::NulError;
use std::str::Utf8Error;
use thiserror::Error;

use gdal_sys::{CPLErr, OGRErr};

pub type Result<T> = std::result::Result<T, RegionError>;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("FfiNulError")]
    FfiNulError(#[from] NulError),
    #[error("StrUtf8Error")]
    StrUtf8Error(#[from] Utf8Error),
    #[error("CPL error class: '{class:?}', error number: '{number}', error msg: '{msg}'")]
    CplError {
        class: CplErrType,
        number: i32,
        msg: String,
    },
    #[error("GDAL method '{method_name}' returned a NULL pointer. Error msg: '{msg}'")]
    NullPointer {
        method_name: &'static str,
        msg: String,
    },
    #[error("OGR method '{method_name}' returned error: '{err:?}'")]
    OgrError {
        err: OGRErr::Type,
        method_name: &'static str,
    },
    #[error("Invalid CRS definition '{definition}': {msg}")]
    InvalidCrs { definition: String, msg: String },
    #[error("'{path}' must contain exactly one feature, found {count}")]
    MultiFeature { path: String, count: i64 },
    #[error("Malformed region document: {0}")]
    MalformedDocument(String),
    #[error("No row with id {id} in '{table}'")]
    NotFound { table: String, id: i64 },
    #[error("Only CRS with units of metres or degrees are supported, got '{0}'")]
    UnsupportedUnit(String),
    #[error("Expected a polygon, got {0}")]
    UnsupportedGeometry(String),
    #[error("'{0}' is not implemented")]
    NotImplemented(&'static str),
    #[error("Invalid column identifier '{0}'")]
    InvalidIdentifier(String),
    #[error("Unable to unlink mem file: {file_name}")]
    UnlinkMemFile { file_name: String },
    #[error("Unable to open '{path}': {msg}")]
    Unreadable { path: String, msg: String },
    #[error("Invalid coordinate range while transforming points from {from} to {to}: {msg:?}")]
    InvalidCoordinateRange {
        from: String,
        to: String,
        msg: Option<String>,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A wrapper for [`CPLErr::Type`] that reflects it as an enum
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(C)]
pub enum CplErrType {
    None = 0,
    Debug = 1,
    Warning = 2,
    Failure = 3,
    Fatal = 4,
}

impl From<CPLErr::Type> for CplErrType {
    fn from(error_type: CPLErr::Type) -> Self {
        if error_type > 4 {
            return Self::None; // fallback type, should not happen
        }

        unsafe { std::mem::transmute(error_type) }
    }
}

impl CplErrType {
    /// The `log` level GDAL messages of this class are forwarded at.
    pub fn log_level(self) -> log::Level {
        match self {
            CplErrType::None | CplErrType::Debug => log::Level::Debug,
            CplErrType::Warning => log::Level::Warn,
            CplErrType::Failure | CplErrType::Fatal => log::Level::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpl_class_maps_to_log_level() {
        assert_eq!(CplErrType::from(CPLErr::CE_Warning), CplErrType::Warning);
        assert_eq!(CplErrType::from(CPLErr::CE_Failure).log_level(), log::Level::Error);
        assert_eq!(CplErrType::from(17), CplErrType::None);
    }

    #[test]
    fn messages_name_the_offending_input() {
        let err = RegionError::MultiFeature {
            path: "two.geojson".to_string(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "'two.geojson' must contain exactly one feature, found 2"
        );
        assert_eq!(
            RegionError::NotImplemented("to_db").to_string(),
            "'to_db' is not implemented"
        );
    }
}
