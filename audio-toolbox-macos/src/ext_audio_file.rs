use std::marker::PhantomData;
use std::ops::Deref;
use std::path::Path;
use std::ptr;

use audio_toolbox_core::{FileCreateOptions, OsStatus, ToolboxError};

use crate::policy::{AudioFileWrapper, ExtAudioFileWrapper};
use crate::sys;
use crate::url::CfUrl;

/// Opens an existing file for reading with format conversion.
pub fn open(path: &Path) -> Result<ExtAudioFileWrapper, ToolboxError> {
    let url = CfUrl::from_path(path)?;
    log::debug!("opening extended file {}", path.display());

    // SAFETY: `url` outlives the call.
    unsafe {
        ExtAudioFileWrapper::create("ExtAudioFileOpenURL", |out| {
            OsStatus(sys::ExtAudioFileOpenURL(url.as_raw(), out))
        })
    }
}

/// Creates a new file for writing with format conversion.
pub fn create(
    path: &Path,
    options: &FileCreateOptions,
) -> Result<ExtAudioFileWrapper, ToolboxError> {
    options
        .validate()
        .map_err(ToolboxError::InvalidConfiguration)?;
    let url = CfUrl::from_path(path)?;

    log::debug!(
        "creating extended {:?} file {} ({})",
        options.file_type,
        path.display(),
        options.format
    );

    // SAFETY: `url` and `options.format` outlive the call; no channel layout.
    unsafe {
        ExtAudioFileWrapper::create("ExtAudioFileCreateWithURL", |out| {
            OsStatus(sys::ExtAudioFileCreateWithURL(
                url.as_raw(),
                options.file_type.type_id(),
                &options.format,
                ptr::null(),
                options.flags(),
                out,
            ))
        })
    }
}

/// An extended file layered over an `AudioFileWrapper` it borrows.
///
/// The underlying `AudioFileID` must stay open until the extended file is
/// disposed, so the borrow ties the two lifetimes together. Dropping this
/// disposes only the extended file.
#[derive(Debug)]
pub struct WrappedExtAudioFile<'a> {
    inner: ExtAudioFileWrapper,
    _file: PhantomData<&'a AudioFileWrapper>,
}

impl WrappedExtAudioFile<'_> {
    /// Disposes the extended file now, surfacing any failure.
    pub fn close(&mut self) -> Result<(), ToolboxError> {
        self.inner.close()
    }
}

impl Deref for WrappedExtAudioFile<'_> {
    type Target = ExtAudioFileWrapper;

    fn deref(&self) -> &ExtAudioFileWrapper {
        &self.inner
    }
}

/// Wraps an already open audio file for format-converting access.
pub fn wrap(
    file: &AudioFileWrapper,
    for_writing: bool,
) -> Result<WrappedExtAudioFile<'_>, ToolboxError> {
    let file_id = file.live_handle()?;

    // SAFETY: `file_id` is live for the borrow carried by the result.
    let inner = unsafe {
        ExtAudioFileWrapper::create("ExtAudioFileWrapAudioFileID", |out| {
            OsStatus(sys::ExtAudioFileWrapAudioFileID(
                file_id.as_raw(),
                sys::Boolean::from(for_writing),
                out,
            ))
        })?
    };
    Ok(WrappedExtAudioFile {
        inner,
        _file: PhantomData,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio_file;
    use audio_toolbox_core::{FilePermissions, FileType, ResourceKind, StreamDescription};
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("atk-ext-{}-{}", std::process::id(), name))
    }

    #[test]
    fn create_then_open() {
        let path = scratch("float.caf");
        let format = StreamDescription::pcm_f32(48_000.0, 2);
        let options = FileCreateOptions::new(FileType::Caf, format);

        let created = create(&path, &options).unwrap();
        assert!(created.is_valid());
        drop(created);

        let opened = open(&path).unwrap();
        assert!(opened.is_valid());
        drop(opened);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn wrap_open_file_for_reading() {
        let path = scratch("wrapped.caf");
        let format = StreamDescription::pcm_i16(44_100.0, 1);
        let options = FileCreateOptions::new(FileType::Caf, format);
        audio_file::create(&path, &options).unwrap();

        let file = audio_file::open(&path, FilePermissions::Read, None).unwrap();
        let mut ext = wrap(&file, false).unwrap();
        assert!(ext.is_valid());
        ext.close().unwrap();
        assert!(!ext.is_valid());
        assert!(file.is_valid());

        drop(file);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn wrapping_empty_file_is_an_error() {
        let empty = AudioFileWrapper::default();
        assert!(matches!(
            wrap(&empty, false),
            Err(ToolboxError::NullHandle(ResourceKind::File))
        ));
    }
}
