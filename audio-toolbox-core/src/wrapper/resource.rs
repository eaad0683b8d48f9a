use std::ffi::c_void;
use std::fmt;
use std::mem;
use std::ptr;

use crate::models::error::ToolboxError;
use crate::models::handle::NativeHandle;
use crate::models::resource_kind::ResourceKind;
use crate::models::status::OsStatus;
use crate::traits::disposal_policy::DisposalPolicy;

/// Owns zero or one native handle of the kind described by `P`.
///
/// State machine:
/// ```text
/// Empty ──(adopt non-null / successful create)──→ Owning
/// Owning ──(drop / close / release / take / transfer)──→ Empty
/// ```
///
/// The handle is disposed through `P` exactly once: on drop, on `close`, or
/// when replaced by `reset`/`transfer_from`. Ownership moves out through
/// `release`, `take`, or an ordinary Rust move. Not `Clone`.
pub struct ResourceWrapper<P: DisposalPolicy> {
    handle: Option<NativeHandle>,
    policy: P,
}

impl<P: DisposalPolicy> ResourceWrapper<P> {
    /// An empty wrapper. No native call is made.
    pub fn empty_with(policy: P) -> Self {
        Self {
            handle: None,
            policy,
        }
    }

    /// Takes ownership of `handle`. `None` yields an empty wrapper.
    ///
    /// # Safety
    ///
    /// `handle` must come from a successful create primitive of `policy`'s
    /// kind, and nothing else may dispose it or adopt it afterwards.
    pub unsafe fn from_handle_with(policy: P, handle: Option<NativeHandle>) -> Self {
        if let Some(handle) = handle {
            log::debug!("adopting {} handle {:?}", policy.kind(), handle);
        }
        Self { handle, policy }
    }

    /// Takes ownership of a raw handle. Null yields an empty wrapper.
    ///
    /// # Safety
    ///
    /// Same contract as [`ResourceWrapper::from_handle_with`].
    pub unsafe fn from_raw_with(policy: P, raw: *mut c_void) -> Self {
        Self::from_handle_with(policy, NativeHandle::from_raw(raw))
    }

    /// Runs a native create primitive and adopts the handle it produces.
    ///
    /// `create` receives the out-parameter and returns the native status.
    /// A non-zero status is returned as [`ToolboxError::Status`] and whatever
    /// was written to the out-parameter is discarded.
    ///
    /// # Safety
    ///
    /// On success, `create` must write either null or a handle the caller
    /// owns outright, of `policy`'s kind.
    pub unsafe fn create_with<F>(
        policy: P,
        operation: &'static str,
        create: F,
    ) -> Result<Self, ToolboxError>
    where
        F: FnOnce(&mut *mut c_void) -> OsStatus,
    {
        let handle = run_create(policy.kind(), operation, create)?;
        Ok(Self::from_handle_with(policy, handle))
    }

    /// Like [`ResourceWrapper::create_with`], but reports failure as an empty
    /// wrapper. The error is logged.
    ///
    /// # Safety
    ///
    /// Same contract as [`ResourceWrapper::create_with`].
    pub unsafe fn create_or_empty<F>(policy: P, operation: &'static str, create: F) -> Self
    where
        F: FnOnce(&mut *mut c_void) -> OsStatus,
    {
        match run_create(policy.kind(), operation, create) {
            Ok(handle) => Self::from_handle_with(policy, handle),
            Err(e) => {
                log::warn!("{}; {} left empty", e, policy.kind());
                Self::empty_with(policy)
            }
        }
    }

    /// True iff a handle is held. Never calls into the native library.
    pub fn is_valid(&self) -> bool {
        self.handle.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.handle.is_none()
    }

    /// The held handle, without giving up ownership.
    pub fn handle(&self) -> Option<NativeHandle> {
        self.handle
    }

    /// The held handle, or `NullHandle` when empty. For native calls that
    /// need a live object.
    pub fn live_handle(&self) -> Result<NativeHandle, ToolboxError> {
        self.handle.ok_or(ToolboxError::NullHandle(self.kind()))
    }

    /// The held handle as a raw pointer; null when empty.
    pub fn as_raw(&self) -> *mut c_void {
        self.handle.map_or(ptr::null_mut(), |h| h.as_raw())
    }

    pub fn kind(&self) -> ResourceKind {
        self.policy.kind()
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Gives up ownership without disposing. The wrapper becomes empty and
    /// the caller is responsible for the returned handle.
    #[must_use = "the released handle leaks unless it is disposed or adopted"]
    pub fn release(&mut self) -> Option<NativeHandle> {
        self.handle.take()
    }

    /// Moves the handle into a new wrapper, leaving this one empty.
    pub fn take(&mut self) -> Self
    where
        P: Clone,
    {
        Self {
            handle: self.handle.take(),
            policy: self.policy.clone(),
        }
    }

    /// Move-assignment: disposes the current handle, then adopts `other`'s.
    /// `other` is left empty.
    ///
    /// # Panics
    ///
    /// If the two wrappers dispose different kinds. Only policies that carry
    /// their kind at runtime can get here.
    pub fn transfer_from(&mut self, other: &mut Self) {
        assert_eq!(
            self.kind(),
            other.kind(),
            "transfer between wrappers of different kinds"
        );
        let incoming = other.handle.take();
        if let Some(current) = mem::replace(&mut self.handle, incoming) {
            self.dispose_logged(current);
        }
    }

    /// Disposes the current handle (if any) and installs `handle`.
    ///
    /// Resetting to the handle already held is a no-op.
    ///
    /// # Safety
    ///
    /// Same contract as [`ResourceWrapper::from_handle_with`] for `handle`.
    pub unsafe fn reset(&mut self, handle: Option<NativeHandle>) {
        if handle.is_some() && handle == self.handle {
            return;
        }
        if let Some(handle) = handle {
            log::debug!("adopting {} handle {:?}", self.kind(), handle);
        }
        if let Some(old) = mem::replace(&mut self.handle, handle) {
            self.dispose_logged(old);
        }
    }

    /// Disposes the handle now and reports the native status.
    ///
    /// The wrapper is empty afterwards whether or not disposal succeeded, so
    /// drop will not retry it. Closing an empty wrapper is a no-op.
    pub fn close(&mut self) -> Result<(), ToolboxError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        log::debug!("closing {} handle {:?}", self.kind(), handle);
        // SAFETY: the handle was owned by this wrapper and is now detached.
        let status = unsafe { self.policy.dispose(handle) };
        status.into_result(self.kind().error_domain(), self.kind().dispose_operation())
    }

    fn dispose_logged(&self, handle: NativeHandle) {
        log::debug!("disposing {} handle {:?}", self.kind(), handle);
        // SAFETY: the handle was owned by this wrapper and is now detached.
        let status = unsafe { self.policy.dispose(handle) };
        let kind = self.kind();
        if let Err(e) = status.into_result(kind.error_domain(), kind.dispose_operation()) {
            log::warn!("{}", e);
        }
    }
}

impl<P: DisposalPolicy + Default> ResourceWrapper<P> {
    /// Takes ownership of a raw handle using the default policy.
    ///
    /// # Safety
    ///
    /// Same contract as [`ResourceWrapper::from_handle_with`].
    pub unsafe fn from_raw(raw: *mut c_void) -> Self {
        Self::from_raw_with(P::default(), raw)
    }

    /// Runs a native create primitive using the default policy.
    ///
    /// # Safety
    ///
    /// Same contract as [`ResourceWrapper::create_with`].
    pub unsafe fn create<F>(operation: &'static str, create: F) -> Result<Self, ToolboxError>
    where
        F: FnOnce(&mut *mut c_void) -> OsStatus,
    {
        Self::create_with(P::default(), operation, create)
    }
}

impl<P: DisposalPolicy + Default> Default for ResourceWrapper<P> {
    fn default() -> Self {
        Self::empty_with(P::default())
    }
}

impl<P: DisposalPolicy> Drop for ResourceWrapper<P> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.dispose_logged(handle);
        }
    }
}

impl<P: DisposalPolicy> fmt::Debug for ResourceWrapper<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceWrapper")
            .field("kind", &self.kind())
            .field("handle", &self.handle)
            .finish()
    }
}

fn run_create<F>(
    kind: ResourceKind,
    operation: &'static str,
    create: F,
) -> Result<Option<NativeHandle>, ToolboxError>
where
    F: FnOnce(&mut *mut c_void) -> OsStatus,
{
    let mut raw: *mut c_void = ptr::null_mut();
    let status = create(&mut raw);
    if !status.is_ok() && !raw.is_null() {
        log::debug!("{} wrote {:p} before failing; discarding", operation, raw);
    }
    status.into_result(kind.error_domain(), operation)?;
    Ok(NativeHandle::from_raw(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::{codes, ErrorDomain};
    use crate::testing::{DisposalRecord, MockDisposal, MockSurface};

    type MockWrapper = ResourceWrapper<MockDisposal>;

    fn owning(surface: &MockSurface, kind: ResourceKind) -> MockWrapper {
        unsafe {
            MockWrapper::create_with(surface.policy(kind), "MockCreate", |out| {
                surface.create(kind, out)
            })
        }
        .unwrap()
    }

    #[test]
    fn default_wrappers_are_empty() {
        let surface = MockSurface::new();
        for kind in ResourceKind::ALL {
            let wrapper = MockWrapper::empty_with(surface.policy(kind));
            assert!(!wrapper.is_valid());
            assert!(wrapper.is_empty());
            assert!(wrapper.as_raw().is_null());
            assert_eq!(wrapper.kind(), kind);
        }
        assert!(surface.disposals().is_empty());
    }

    #[test]
    fn dropping_empty_never_disposes() {
        let surface = MockSurface::new();
        {
            let _a = MockWrapper::empty_with(surface.policy(ResourceKind::File));
            let _b = unsafe {
                MockWrapper::from_raw_with(surface.policy(ResourceKind::File), ptr::null_mut())
            };
        }
        assert!(surface.disposals().is_empty());
    }

    #[test]
    fn successful_create_is_disposed_once_on_drop() {
        let surface = MockSurface::new();
        {
            let wrapper = owning(&surface, ResourceKind::Converter);
            assert!(wrapper.is_valid());
            assert_eq!(wrapper.handle().map(|h| h.addr()), Some(0x1));
            assert!(surface.disposals().is_empty());
        }
        assert_eq!(
            surface.disposals(),
            vec![DisposalRecord {
                kind: ResourceKind::Converter,
                addr: 0x1
            }]
        );
        assert_eq!(surface.live_handles(), 0);
    }

    #[test]
    fn adopted_handle_is_disposed_with_its_value() {
        let surface = MockSurface::new();
        let handle = surface.issue(ResourceKind::ProcessingGraph);
        let policy = surface.policy(ResourceKind::ProcessingGraph);
        drop(unsafe { MockWrapper::from_handle_with(policy, Some(handle)) });
        assert_eq!(surface.dispose_count(handle.addr()), 1);
    }

    #[test]
    fn failed_create_returns_status_and_holds_nothing() {
        let surface = MockSurface::new();
        surface.fail_next_create(codes::FILE_NOT_FOUND);

        let result = unsafe {
            MockWrapper::create_with(surface.policy(ResourceKind::File), "AudioFileOpenURL", |out| {
                surface.create(ResourceKind::File, out)
            })
        };

        assert_eq!(
            result.unwrap_err(),
            ToolboxError::Status {
                domain: ErrorDomain::AudioFile,
                status: codes::FILE_NOT_FOUND,
                operation: "AudioFileOpenURL",
            }
        );
        assert_eq!(surface.live_handles(), 0);
        assert!(surface.disposals().is_empty());
    }

    #[test]
    fn failed_create_or_empty_yields_empty_wrapper() {
        let surface = MockSurface::new();
        surface.fail_next_create(codes::MEM_FULL);

        let policy = surface.policy(ResourceKind::ExtendedFile);
        let wrapper = unsafe {
            MockWrapper::create_or_empty(policy, "ExtAudioFileOpenURL", |out| {
                surface.create(ResourceKind::ExtendedFile, out)
            })
        };

        assert!(!wrapper.is_valid());
        drop(wrapper);
        assert!(surface.disposals().is_empty());
    }

    #[test]
    fn null_output_on_success_is_empty() {
        let surface = MockSurface::new();
        let wrapper = unsafe {
            MockWrapper::create_with(surface.policy(ResourceKind::Converter), "MockCreate", |_| {
                OsStatus::NO_ERR
            })
        }
        .unwrap();
        assert!(wrapper.is_empty());
    }

    #[test]
    fn take_moves_ownership() {
        let surface = MockSurface::new();
        let mut source = owning(&surface, ResourceKind::File);
        let addr = source.handle().unwrap().addr();

        let destination = source.take();
        assert!(!source.is_valid());
        assert!(destination.is_valid());
        assert_eq!(destination.handle().unwrap().addr(), addr);

        drop(source);
        assert_eq!(surface.dispose_count(addr), 0);
        drop(destination);
        assert_eq!(surface.dispose_count(addr), 1);
    }

    #[test]
    fn rust_move_keeps_single_disposal() {
        let surface = MockSurface::new();
        let wrapper = owning(&surface, ResourceKind::Converter);
        let mut moved = vec![];
        moved.push(wrapper);
        drop(moved);
        assert_eq!(surface.dispose_count(0x1), 1);
        assert_eq!(surface.double_disposals(), 0);
    }

    #[test]
    fn transfer_disposes_destination_first() {
        let surface = MockSurface::new();
        let mut destination = owning(&surface, ResourceKind::ExtendedFile);
        let mut source = owning(&surface, ResourceKind::ExtendedFile);
        let old = destination.handle().unwrap().addr();
        let incoming = source.handle().unwrap().addr();

        destination.transfer_from(&mut source);

        assert_eq!(surface.dispose_count(old), 1);
        assert!(source.is_empty());
        assert_eq!(destination.handle().unwrap().addr(), incoming);

        drop(source);
        drop(destination);
        assert_eq!(surface.dispose_count(incoming), 1);
        assert_eq!(surface.double_disposals(), 0);
    }

    #[test]
    fn release_detaches_without_disposing() {
        let surface = MockSurface::new();
        let mut wrapper = owning(&surface, ResourceKind::ProcessingGraph);

        let handle = wrapper.release().unwrap();
        assert!(wrapper.is_empty());
        drop(wrapper);
        assert_eq!(surface.dispose_count(handle.addr()), 0);

        // Caller re-adopts so the ledger ends balanced.
        let policy = surface.policy(ResourceKind::ProcessingGraph);
        drop(unsafe { MockWrapper::from_handle_with(policy, Some(handle)) });
        assert_eq!(surface.dispose_count(handle.addr()), 1);
    }

    #[test]
    fn reset_replaces_and_disposes_old() {
        let surface = MockSurface::new();
        let mut wrapper = owning(&surface, ResourceKind::Converter);
        let old = wrapper.handle().unwrap().addr();
        let fresh = surface.issue(ResourceKind::Converter);

        unsafe { wrapper.reset(Some(fresh)) };
        assert_eq!(surface.dispose_count(old), 1);
        assert_eq!(wrapper.handle(), Some(fresh));

        unsafe { wrapper.reset(None) };
        assert!(wrapper.is_empty());
        assert_eq!(surface.dispose_count(fresh.addr()), 1);
    }

    #[test]
    fn reset_to_owned_handle_is_a_no_op() {
        let surface = MockSurface::new();
        let mut wrapper = owning(&surface, ResourceKind::File);
        let current = wrapper.handle();

        unsafe { wrapper.reset(current) };
        assert_eq!(wrapper.handle(), current);
        assert_eq!(surface.dispose_count(0x1), 0);

        drop(wrapper);
        assert_eq!(surface.dispose_count(0x1), 1);
        assert_eq!(surface.double_disposals(), 0);
    }

    #[test]
    #[should_panic(expected = "different kinds")]
    fn transfer_between_kinds_panics() {
        let surface = MockSurface::new();
        let mut file = owning(&surface, ResourceKind::File);
        let mut converter = owning(&surface, ResourceKind::Converter);
        file.transfer_from(&mut converter);
    }

    #[test]
    fn close_reports_dispose_failure_and_empties() {
        let surface = MockSurface::new();
        let mut wrapper = owning(&surface, ResourceKind::File);
        surface.fail_next_dispose(codes::FILE_NOT_OPEN);

        let err = wrapper.close().unwrap_err();
        assert_eq!(
            err,
            ToolboxError::Status {
                domain: ErrorDomain::AudioFile,
                status: codes::FILE_NOT_OPEN,
                operation: "AudioFileClose",
            }
        );
        assert!(wrapper.is_empty());

        drop(wrapper);
        assert_eq!(surface.dispose_count(0x1), 1);
    }

    #[test]
    fn close_on_empty_is_a_no_op() {
        let surface = MockSurface::new();
        let mut wrapper = MockWrapper::empty_with(surface.policy(ResourceKind::Converter));
        assert!(wrapper.close().is_ok());
        assert!(surface.disposals().is_empty());
    }

    #[test]
    fn drop_absorbs_dispose_failure() {
        let surface = MockSurface::new();
        let wrapper = owning(&surface, ResourceKind::ProcessingGraph);
        surface.fail_next_dispose(codes::GRAPH_CANNOT_DO_IN_CURRENT_CONTEXT);
        drop(wrapper);
        assert_eq!(surface.dispose_count(0x1), 1);
    }

    #[test]
    fn disposal_runs_during_unwinding() {
        let surface = MockSurface::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _wrapper = owning(&surface, ResourceKind::File);
            panic!("error elsewhere");
        }));
        assert!(result.is_err());
        assert_eq!(surface.dispose_count(0x1), 1);
    }

    #[test]
    fn disposal_runs_on_early_return() {
        fn open_then_bail(surface: &MockSurface) -> Result<(), ToolboxError> {
            let wrapper = owning(surface, ResourceKind::Converter);
            wrapper.live_handle()?;
            Err(ToolboxError::InvalidConfiguration("bail".into()))
        }

        let surface = MockSurface::new();
        assert!(open_then_bail(&surface).is_err());
        assert_eq!(surface.dispose_count(0x1), 1);
    }

    #[test]
    fn live_handle_on_empty_is_null_handle_error() {
        let surface = MockSurface::new();
        let wrapper = MockWrapper::empty_with(surface.policy(ResourceKind::ExtendedFile));
        assert_eq!(
            wrapper.live_handle().unwrap_err(),
            ToolboxError::NullHandle(ResourceKind::ExtendedFile)
        );
    }

    #[test]
    fn validity_tracks_handle_through_every_transition() {
        let surface = MockSurface::new();
        let mut wrapper = MockWrapper::empty_with(surface.policy(ResourceKind::File));
        assert_eq!(wrapper.is_valid(), wrapper.handle().is_some());

        unsafe { wrapper.reset(Some(surface.issue(ResourceKind::File))) };
        assert_eq!(wrapper.is_valid(), wrapper.handle().is_some());
        assert!(wrapper.is_valid());

        let mut other = wrapper.take();
        assert_eq!(wrapper.is_valid(), wrapper.handle().is_some());
        assert_eq!(other.is_valid(), other.handle().is_some());

        other.close().unwrap();
        assert_eq!(other.is_valid(), other.handle().is_some());
        assert!(!other.is_valid());
    }

    #[test]
    fn debug_shows_kind_and_handle() {
        let surface = MockSurface::new();
        let wrapper = owning(&surface, ResourceKind::Converter);
        assert_eq!(
            format!("{:?}", wrapper),
            "ResourceWrapper { kind: Converter, handle: Some(NativeHandle(0x1)) }"
        );
    }

    #[derive(Default)]
    struct Noop;

    impl DisposalPolicy for Noop {
        fn kind(&self) -> ResourceKind {
            ResourceKind::Converter
        }

        unsafe fn dispose(&self, _handle: NativeHandle) -> OsStatus {
            OsStatus::NO_ERR
        }
    }

    #[test]
    fn zero_sized_policy_keeps_wrapper_pointer_sized() {
        assert_eq!(
            mem::size_of::<ResourceWrapper<Noop>>(),
            mem::size_of::<*mut c_void>()
        );
        assert!(!ResourceWrapper::<Noop>::default().is_valid());
    }

    #[test]
    fn wrappers_can_move_between_threads() {
        fn assert_send<T: Send>() {}
        assert_send::<ResourceWrapper<Noop>>();
        assert_send::<MockWrapper>();
    }
}
