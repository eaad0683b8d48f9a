use std::ffi::c_void;
use std::fmt;
use std::ptr::NonNull;

/// An opaque, non-null token issued by a native create primitive.
///
/// The layer never dereferences a handle; it only tracks whether one is held.
/// The null sentinel is expressed as `Option<NativeHandle>`, which has the same
/// size as a raw pointer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NativeHandle(NonNull<c_void>);

// SAFETY: a handle is an opaque token, never dereferenced here. AudioToolbox
// objects may be released from any thread, so moving the token is sound.
unsafe impl Send for NativeHandle {}

impl NativeHandle {
    /// Wraps a raw handle, returning `None` for null.
    pub fn from_raw(raw: *mut c_void) -> Option<Self> {
        NonNull::new(raw).map(Self)
    }

    /// Builds a handle from a bare address. Used by mock surfaces.
    pub fn from_addr(addr: usize) -> Option<Self> {
        Self::from_raw(addr as *mut c_void)
    }

    pub fn as_raw(&self) -> *mut c_void {
        self.0.as_ptr()
    }

    pub fn addr(&self) -> usize {
        self.0.as_ptr() as usize
    }
}

impl fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeHandle({:#x})", self.addr())
    }
}
