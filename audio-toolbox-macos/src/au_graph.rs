use audio_toolbox_core::{OsStatus, ToolboxError};

use crate::policy::AuGraphWrapper;
use crate::sys;

/// Creates an empty processing graph.
pub fn new() -> Result<AuGraphWrapper, ToolboxError> {
    // SAFETY: NewAUGraph hands the caller a graph it owns on success.
    unsafe { AuGraphWrapper::create("NewAUGraph", |out| OsStatus(sys::NewAUGraph(out))) }
}
