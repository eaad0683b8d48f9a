//! Disposal policies for the four AudioToolbox handle kinds.
//!
//! Each policy is zero-sized, so a wrapper is exactly one pointer wide.

use audio_toolbox_core::{DisposalPolicy, NativeHandle, OsStatus, ResourceKind, ResourceWrapper};

use crate::sys;

/// Releases an `AudioConverterRef` with `AudioConverterDispose`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioConverterDisposal;

impl DisposalPolicy for AudioConverterDisposal {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Converter
    }

    unsafe fn dispose(&self, handle: NativeHandle) -> OsStatus {
        OsStatus(sys::AudioConverterDispose(handle.as_raw()))
    }
}

/// Releases an `AudioFileID` with `AudioFileClose`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioFileDisposal;

impl DisposalPolicy for AudioFileDisposal {
    fn kind(&self) -> ResourceKind {
        ResourceKind::File
    }

    unsafe fn dispose(&self, handle: NativeHandle) -> OsStatus {
        OsStatus(sys::AudioFileClose(handle.as_raw()))
    }
}

/// Releases an `ExtAudioFileRef` with `ExtAudioFileDispose`.
///
/// Pending asynchronous writes are flushed by the native call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtAudioFileDisposal;

impl DisposalPolicy for ExtAudioFileDisposal {
    fn kind(&self) -> ResourceKind {
        ResourceKind::ExtendedFile
    }

    unsafe fn dispose(&self, handle: NativeHandle) -> OsStatus {
        OsStatus(sys::ExtAudioFileDispose(handle.as_raw()))
    }
}

/// Releases an `AUGraph` with `DisposeAUGraph`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuGraphDisposal;

impl DisposalPolicy for AuGraphDisposal {
    fn kind(&self) -> ResourceKind {
        ResourceKind::ProcessingGraph
    }

    unsafe fn dispose(&self, handle: NativeHandle) -> OsStatus {
        OsStatus(sys::DisposeAUGraph(handle.as_raw()))
    }
}

pub type AudioConverterWrapper = ResourceWrapper<AudioConverterDisposal>;
pub type AudioFileWrapper = ResourceWrapper<AudioFileDisposal>;
pub type ExtAudioFileWrapper = ResourceWrapper<ExtAudioFileDisposal>;
pub type AuGraphWrapper = ResourceWrapper<AuGraphDisposal>;
