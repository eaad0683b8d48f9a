//! # audio-toolbox-core
//!
//! Platform-agnostic ownership layer for AudioToolbox handles.
//!
//! Native converters, audio files, extended audio files and processing graphs
//! are opaque handles that must be disposed exactly once. This crate provides
//! the generic RAII wrapper that guarantees it, the `DisposalPolicy` seam that
//! platform backends (macOS AudioToolbox) plug into, and the status/error and
//! stream-format models shared by every backend.
//!
//! ## Architecture
//!
//! ```text
//! audio-toolbox-core (this crate)
//! ├── models/    ← ResourceKind, NativeHandle, OsStatus, ToolboxError, StreamDescription
//! ├── traits/    ← DisposalPolicy
//! ├── wrapper/   ← ResourceWrapper<P>
//! ├── boundary   ← Validity, bool projection, raw-pointer projection
//! └── testing    ← MockSurface (cfg(test) or feature "testing")
//! ```

pub mod boundary;
pub mod models;
pub mod traits;
pub mod wrapper;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export key types at crate root for convenience.
pub use boundary::{is_valid_ptr, Validity};
pub use models::error::{ErrorDomain, ToolboxError};
pub use models::handle::NativeHandle;
pub use models::resource_kind::ResourceKind;
pub use models::status::{fourcc, fourcc_string, OsStatus};
pub use models::stream_description::{
    FileCreateOptions, FilePermissions, FileType, StreamDescription,
};
pub use traits::disposal_policy::DisposalPolicy;
pub use wrapper::resource::ResourceWrapper;
