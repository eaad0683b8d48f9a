use audio_toolbox_core::{OsStatus, StreamDescription, ToolboxError};

use crate::policy::AudioConverterWrapper;
use crate::sys;

/// Creates a converter between two stream formats.
pub fn new(
    source: &StreamDescription,
    destination: &StreamDescription,
) -> Result<AudioConverterWrapper, ToolboxError> {
    source
        .validate()
        .map_err(|e| ToolboxError::InvalidConfiguration(format!("source format: {}", e)))?;
    destination
        .validate()
        .map_err(|e| ToolboxError::InvalidConfiguration(format!("destination format: {}", e)))?;

    log::debug!("creating converter {} -> {}", source, destination);

    // SAFETY: on success AudioConverterNew hands the caller a converter it owns.
    unsafe {
        AudioConverterWrapper::create("AudioConverterNew", |out| {
            OsStatus(sys::AudioConverterNew(source, destination, out))
        })
    }
}
