//! GDAL virtual file systems: in-memory files and remote blob fetches.

use std::ffi::c_void;
use std::fs::File;
use std::io::Write;
use std::mem::ManuallyDrop;
use std::path::{Path, PathBuf};

use gdal_sys::{VSIFCloseL, VSIFileFromMemBuffer, VSIUnlink, VSILFILE};
use tempfile::TempPath;

use crate::config::ThreadLocalOption;
use crate::errors::{RegionError, Result};
use crate::utils::{_last_null_pointer_err, _path_to_c_string, _take_last_error_msg};

const COPY_CHUNK_SIZE: usize = 1 << 20;

/// Creates a new VSIMemFile from a given buffer.
pub fn create_mem_file<P: AsRef<Path>>(file_name: P, data: Vec<u8>) -> Result<()> {
    _create_mem_file(file_name.as_ref(), data)
}

fn _create_mem_file(file_name: &Path, data: Vec<u8>) -> Result<()> {
    let file_name = _path_to_c_string(file_name)?;

    // ownership will be given to GDAL, so it should not be automaticly dropped
    let mut data = ManuallyDrop::new(data);

    let handle = unsafe {
        VSIFileFromMemBuffer(
            file_name.as_ptr(),
            data.as_mut_ptr(),
            data.len() as u64,
            true as i32,
        )
    };

    if handle.is_null() {
        // on error, allow dropping the data again
        ManuallyDrop::into_inner(data);
        return Err(_last_null_pointer_err("VSIFileFromMemBuffer"));
    }

    unsafe {
        VSIFCloseL(handle);
    }

    Ok(())
}

/// Unlink a VSIMemFile.
pub fn unlink_mem_file<P: AsRef<Path>>(file_name: P) -> Result<()> {
    let file_name = file_name.as_ref();
    let file_name_c = _path_to_c_string(file_name)?;

    let rv = unsafe { VSIUnlink(file_name_c.as_ptr()) };

    if rv != 0 {
        return Err(RegionError::UnlinkMemFile {
            file_name: file_name.display().to_string(),
        });
    }

    Ok(())
}

/// An open VSI file handle, closed on drop.
struct VsiFile {
    handle: *mut VSILFILE,
    path: PathBuf,
}

impl VsiFile {
    fn open(path: &Path) -> Result<VsiFile> {
        let c_path = _path_to_c_string(path)?;
        let handle = unsafe { gdal_sys::VSIFOpenL(c_path.as_ptr(), c"rb".as_ptr()) };
        if handle.is_null() {
            return Err(RegionError::Unreadable {
                path: path.display().to_string(),
                msg: _take_last_error_msg(),
            });
        }
        Ok(VsiFile {
            handle,
            path: path.to_path_buf(),
        })
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        unsafe { gdal_sys::VSIFReadL(buf.as_mut_ptr().cast::<c_void>(), 1, buf.len(), self.handle) }
    }

    fn at_eof(&self) -> bool {
        unsafe { gdal_sys::VSIFEofL(self.handle) != 0 }
    }

    /// Writes the rest of the file to `target`. A read that stops short of
    /// end of file is an error.
    fn copy_into(&mut self, target: &mut impl Write) -> Result<u64> {
        let mut buf = vec![0_u8; COPY_CHUNK_SIZE];
        let mut total = 0_u64;
        loop {
            let n = self.read(&mut buf);
            if n == 0 {
                if self.at_eof() {
                    break;
                }
                let msg = _take_last_error_msg();
                return Err(RegionError::Unreadable {
                    path: self.path.display().to_string(),
                    msg: format!("read failed after {total} bytes: {msg}"),
                });
            }
            target.write_all(&buf[..n])?;
            total += n as u64;
        }
        target.flush()?;
        Ok(total)
    }
}

impl Drop for VsiFile {
    fn drop(&mut self) {
        unsafe { VSIFCloseL(self.handle) };
    }
}

/// Streams any path GDAL can read (`/vsimem/`, `/vsiaz/`, `/vsicurl/`, ...) into a local file.
///
/// Returns the number of bytes written. `dest` is removed again if the copy fails.
pub fn copy_to_local(vsi_path: &Path, dest: &Path) -> Result<u64> {
    let mut source = VsiFile::open(vsi_path)?;
    let copied = File::create(dest)
        .map_err(RegionError::from)
        .and_then(|mut target| source.copy_into(&mut target));
    match copied {
        Ok(total) => {
            log::debug!(
                "copied {total} bytes from {} to {}",
                vsi_path.display(),
                dest.display()
            );
            Ok(total)
        }
        Err(err) => {
            let _ = std::fs::remove_file(dest);
            Err(err)
        }
    }
}

/// Copies `vsi_path` into a new, uniquely named temporary file. The name ends
/// in `file_name` so drivers can still recognise the extension.
///
/// The file is deleted when the returned path is dropped.
fn download(vsi_path: &Path, file_name: &str) -> Result<TempPath> {
    let mut source = VsiFile::open(vsi_path)?;
    let mut local = tempfile::Builder::new()
        .prefix("georegion-")
        .suffix(&format!("-{file_name}"))
        .tempfile()?;
    let total = source.copy_into(local.as_file_mut())?;
    log::debug!(
        "downloaded {total} bytes from {} to {}",
        vsi_path.display(),
        local.path().display()
    );
    Ok(local.into_temp_path())
}

/// Downloads `<container>/<blob>` from Azure blob storage into a temporary file.
///
/// `connection` is an Azure storage connection string. It is only visible to
/// GDAL on the calling thread, for the duration of the download. The file is
/// deleted when the returned path is dropped.
pub fn fetch_blob(blob_path: &str, connection: &str) -> Result<TempPath> {
    let blob_path = blob_path
        .trim_start_matches("/vsiaz/")
        .trim_start_matches('/');
    let file_name = Path::new(blob_path)
        .file_name()
        .ok_or_else(|| RegionError::Unreadable {
            path: blob_path.to_string(),
            msg: "blob path has no file name".to_string(),
        })?
        .to_string_lossy()
        .into_owned();

    let _connection = ThreadLocalOption::set("AZURE_STORAGE_CONNECTION_STRING", connection)?;
    download(&PathBuf::from(format!("/vsiaz/{blob_path}")), &file_name)
}
