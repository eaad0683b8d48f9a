use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use audio_toolbox_core::ToolboxError;

use crate::sys;

/// RAII guard over a `CFURLRef` built from a filesystem path; released on drop.
pub(crate) struct CfUrl(sys::CFURLRef);

impl CfUrl {
    pub(crate) fn from_path(path: &Path) -> Result<Self, ToolboxError> {
        let bytes = path.as_os_str().as_bytes();
        if bytes.is_empty() {
            return Err(ToolboxError::InvalidConfiguration("empty path".into()));
        }
        let len = sys::CFIndex::try_from(bytes.len()).map_err(|_| {
            ToolboxError::InvalidConfiguration(format!("path too long: {}", path.display()))
        })?;

        let url = unsafe {
            sys::CFURLCreateFromFileSystemRepresentation(ptr::null(), bytes.as_ptr(), len, 0)
        };
        if url.is_null() {
            return Err(ToolboxError::InvalidConfiguration(format!(
                "cannot form a URL from {}",
                path.display()
            )));
        }
        Ok(Self(url))
    }

    pub(crate) fn as_raw(&self) -> sys::CFURLRef {
        self.0
    }
}

impl Drop for CfUrl {
    fn drop(&mut self) {
        unsafe {
            sys::CFRelease(self.0);
        }
    }
}
