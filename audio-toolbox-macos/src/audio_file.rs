use std::path::Path;

use audio_toolbox_core::{FileCreateOptions, FilePermissions, FileType, OsStatus, ToolboxError};

use crate::policy::AudioFileWrapper;
use crate::sys;
use crate::url::CfUrl;

/// Opens an existing audio file.
///
/// `type_hint` helps the parser when the extension is missing or misleading.
pub fn open(
    path: &Path,
    permissions: FilePermissions,
    type_hint: Option<FileType>,
) -> Result<AudioFileWrapper, ToolboxError> {
    let url = CfUrl::from_path(path)?;
    let hint = type_hint.map(|t| t.type_id()).unwrap_or(0);

    log::debug!("opening {} ({:?})", path.display(), permissions);

    // SAFETY: `url` outlives the call; AudioFileOpenURL hands the caller an
    // AudioFileID it owns on success.
    unsafe {
        AudioFileWrapper::create("AudioFileOpenURL", |out| {
            OsStatus(sys::AudioFileOpenURL(url.as_raw(), permissions.bits(), hint, out))
        })
    }
}

/// Creates a new audio file, replacing any existing one if `erase_existing`.
pub fn create(path: &Path, options: &FileCreateOptions) -> Result<AudioFileWrapper, ToolboxError> {
    options
        .validate()
        .map_err(ToolboxError::InvalidConfiguration)?;
    let url = CfUrl::from_path(path)?;

    log::debug!(
        "creating {:?} file {} ({})",
        options.file_type,
        path.display(),
        options.format
    );

    // SAFETY: `url` and `options.format` outlive the call.
    unsafe {
        AudioFileWrapper::create("AudioFileCreateWithURL", |out| {
            OsStatus(sys::AudioFileCreateWithURL(
                url.as_raw(),
                options.file_type.type_id(),
                &options.format,
                options.flags(),
                out,
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audio_toolbox_core::{ErrorDomain, StreamDescription};
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("atk-{}-{}", std::process::id(), name))
    }

    #[test]
    fn create_then_reopen() {
        let path = scratch("file.wav");
        let format = StreamDescription::pcm_i16(44_100.0, 2);
        let options = FileCreateOptions::new(FileType::Wave, format);

        let mut created = create(&path, &options).unwrap();
        assert!(created.is_valid());
        created.close().unwrap();

        let reopened = open(&path, FilePermissions::Read, Some(FileType::Wave)).unwrap();
        assert!(reopened.is_valid());
        drop(reopened);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_reports_audio_file_status() {
        let err = open(
            Path::new("/nonexistent/atk/missing.caf"),
            FilePermissions::Read,
            None,
        )
        .unwrap_err();
        match err {
            ToolboxError::Status {
                domain, operation, ..
            } => {
                assert_eq!(domain, ErrorDomain::AudioFile);
                assert_eq!(operation, "AudioFileOpenURL");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut options = FileCreateOptions::default();
        options.format.channels_per_frame = 0;
        assert!(matches!(
            create(&scratch("never.caf"), &options),
            Err(ToolboxError::InvalidConfiguration(_))
        ));
    }
}
