//! C-ABI surface over the handle wrappers.
//!
//! Foreign callers receive heap-allocated wrappers as opaque pointers and
//! query or tear them down through `atk_*` functions. Destroying a wrapper
//! disposes its handle; destroying `NULL` does nothing.
//!
//! # Thread safety
//!
//! A wrapper pointer may move between threads but must not be used from two
//! threads at once.

pub mod functions;
mod panic_guard;
