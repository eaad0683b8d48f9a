//! Projections of wrapper validity onto the conventions callers already use.
//!
//! Rust has no implicit truthiness, so validity is offered three ways:
//! `bool::from(&wrapper)`, `wrapper.valid()` for `if let` chains, and
//! [`is_valid_ptr`] for foreign callers holding a raw pointer. All of them
//! are pure reads of `is_valid()`.

use crate::traits::disposal_policy::DisposalPolicy;
use crate::wrapper::resource::ResourceWrapper;

/// Anything that can report whether it currently holds a live resource.
pub trait Validity {
    fn is_valid(&self) -> bool;

    fn is_empty(&self) -> bool {
        !self.is_valid()
    }

    /// `Some(self)` when valid, for `if let Some(w) = wrapper.valid()`.
    fn valid(&self) -> Option<&Self> {
        if self.is_valid() {
            Some(self)
        } else {
            None
        }
    }
}

impl<P: DisposalPolicy> Validity for ResourceWrapper<P> {
    fn is_valid(&self) -> bool {
        ResourceWrapper::is_valid(self)
    }
}

impl<P: DisposalPolicy> From<&ResourceWrapper<P>> for bool {
    fn from(wrapper: &ResourceWrapper<P>) -> bool {
        wrapper.is_valid()
    }
}

/// Validity through a raw pointer. A null pointer projects to `false`.
///
/// # Safety
///
/// `ptr` must be null or point to a live `T`.
pub unsafe fn is_valid_ptr<T: Validity>(ptr: *const T) -> bool {
    match ptr.as_ref() {
        Some(target) => target.is_valid(),
        None => false,
    }
}
