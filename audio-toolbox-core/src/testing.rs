//! In-process stand-in for the native create/dispose primitives.
//!
//! `MockSurface` hands out sequential fake handles starting at `0x1` and
//! records every disposal, so tests can observe exactly how often (and with
//! which handle) a `DisposalPolicy` was invoked.

use std::collections::{HashMap, HashSet};
use std::ffi::c_void;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::handle::NativeHandle;
use crate::models::resource_kind::ResourceKind;
use crate::models::status::OsStatus;
use crate::traits::disposal_policy::DisposalPolicy;

/// Address written to the out-parameter by an injected create failure.
pub const SCRIBBLED_ADDR: usize = 0xDEAD;

/// One invocation of a mock disposal primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisposalRecord {
    pub kind: ResourceKind,
    pub addr: usize,
}

#[derive(Debug)]
struct Ledger {
    next_addr: usize,
    live: HashSet<usize>,
    dispose_counts: HashMap<usize, usize>,
    disposals: Vec<DisposalRecord>,
    fail_create: Option<OsStatus>,
    fail_dispose: Option<OsStatus>,
}

impl Ledger {
    fn new() -> Self {
        Self {
            next_addr: 0x1,
            live: HashSet::new(),
            dispose_counts: HashMap::new(),
            disposals: Vec::new(),
            fail_create: None,
            fail_dispose: None,
        }
    }
}

/// A fake native library shared by every `MockDisposal` it hands out.
#[derive(Debug, Clone)]
pub struct MockSurface {
    ledger: Arc<Mutex<Ledger>>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(Mutex::new(Ledger::new())),
        }
    }

    /// A disposal policy for `kind` that records into this surface.
    ///
    /// The kind is carried at runtime, so wrappers built from different
    /// kinds share a type; `transfer_from` between them panics.
    pub fn policy(&self, kind: ResourceKind) -> MockDisposal {
        MockDisposal {
            kind,
            ledger: Arc::clone(&self.ledger),
        }
    }

    /// The mock create primitive.
    ///
    /// On success writes a fresh handle to `out`. After `fail_next_create`,
    /// writes `SCRIBBLED_ADDR` instead and returns the injected status.
    pub fn create(&self, kind: ResourceKind, out: &mut *mut c_void) -> OsStatus {
        let mut ledger = self.ledger.lock();
        if let Some(status) = ledger.fail_create.take() {
            log::debug!("mock create of {} failing with {}", kind, status);
            *out = SCRIBBLED_ADDR as *mut c_void;
            return status;
        }
        let addr = ledger.next_addr;
        ledger.next_addr += 1;
        ledger.live.insert(addr);
        *out = addr as *mut c_void;
        OsStatus::NO_ERR
    }

    /// Issues a fresh live handle directly.
    pub fn issue(&self, kind: ResourceKind) -> NativeHandle {
        let mut ledger = self.ledger.lock();
        let addr = ledger.next_addr;
        ledger.next_addr += 1;
        ledger.live.insert(addr);
        log::debug!("mock issued {} handle {:#x}", kind, addr);
        NativeHandle::from_addr(addr).unwrap_or_else(|| unreachable!("addresses start at 0x1"))
    }

    pub fn fail_next_create(&self, status: OsStatus) {
        self.ledger.lock().fail_create = Some(status);
    }

    /// The next disposal is still recorded, but reports `status`.
    pub fn fail_next_dispose(&self, status: OsStatus) {
        self.ledger.lock().fail_dispose = Some(status);
    }

    pub fn disposals(&self) -> Vec<DisposalRecord> {
        self.ledger.lock().disposals.clone()
    }

    pub fn dispose_count(&self, addr: usize) -> usize {
        self.ledger
            .lock()
            .dispose_counts
            .get(&addr)
            .copied()
            .unwrap_or(0)
    }

    /// Handles issued and not yet disposed.
    pub fn live_handles(&self) -> usize {
        self.ledger.lock().live.len()
    }

    /// Number of distinct handles disposed more than once.
    pub fn double_disposals(&self) -> usize {
        self.ledger
            .lock()
            .dispose_counts
            .values()
            .filter(|&&n| n > 1)
            .count()
    }
}

impl Default for MockSurface {
    fn default() -> Self {
        Self::new()
    }
}

/// `DisposalPolicy` backed by a `MockSurface` ledger.
#[derive(Debug, Clone)]
pub struct MockDisposal {
    kind: ResourceKind,
    ledger: Arc<Mutex<Ledger>>,
}

impl DisposalPolicy for MockDisposal {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    unsafe fn dispose(&self, handle: NativeHandle) -> OsStatus {
        let mut ledger = self.ledger.lock();
        let addr = handle.addr();
        ledger.live.remove(&addr);
        *ledger.dispose_counts.entry(addr).or_insert(0) += 1;
        ledger.disposals.push(DisposalRecord {
            kind: self.kind,
            addr,
        });
        ledger.fail_dispose.take().unwrap_or(OsStatus::NO_ERR)
    }
}
