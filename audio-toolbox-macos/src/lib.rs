//! # audio-toolbox-macos
//!
//! macOS AudioToolbox backend for `audio-toolbox-core`.
//!
//! Provides the four concrete disposal policies, the per-kind wrapper
//! aliases, factories that call the native create primitives, and a C-ABI
//! surface for foreign callers. On other platforms the crate is empty.

#[cfg(target_os = "macos")]
pub mod au_graph;
#[cfg(target_os = "macos")]
pub mod audio_converter;
#[cfg(target_os = "macos")]
pub mod audio_file;
#[cfg(target_os = "macos")]
pub mod ext_audio_file;
#[cfg(target_os = "macos")]
pub mod ffi;
#[cfg(target_os = "macos")]
pub mod policy;
#[cfg(target_os = "macos")]
pub mod sys;
#[cfg(target_os = "macos")]
mod url;

#[cfg(target_os = "macos")]
pub use ext_audio_file::WrappedExtAudioFile;
#[cfg(target_os = "macos")]
pub use policy::{
    AudioConverterDisposal, AudioConverterWrapper, AudioFileDisposal, AudioFileWrapper,
    AuGraphDisposal, AuGraphWrapper, ExtAudioFileDisposal, ExtAudioFileWrapper,
};
