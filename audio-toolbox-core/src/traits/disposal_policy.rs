use crate::models::handle::NativeHandle;
use crate::models::resource_kind::ResourceKind;
use crate::models::status::OsStatus;

/// Per-kind knowledge of how to release a native handle.
///
/// Implemented by:
/// - `AudioConverterDisposal`, `AudioFileDisposal`, `ExtAudioFileDisposal`,
///   `AuGraphDisposal` (macOS backend, zero-sized)
/// - `MockDisposal` (in-process test double)
///
/// `ResourceWrapper` is the only caller. It guarantees a single call per
/// distinct handle and never passes null, so implementations need not
/// tolerate either.
pub trait DisposalPolicy {
    /// The kind of resource this policy releases.
    fn kind(&self) -> ResourceKind;

    /// Release `handle` through the native primitive for this kind.
    ///
    /// # Safety
    ///
    /// `handle` must be a live handle of this policy's kind, owned by the
    /// caller, and must not be used again after this call.
    unsafe fn dispose(&self, handle: NativeHandle) -> OsStatus;
}
