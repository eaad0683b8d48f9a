//! Exported `extern "C"` functions.
//!
//! Every wrapper kind gets the same five entry points:
//!
//! - `atk_<kind>_new_empty` allocates an empty wrapper.
//! - `atk_<kind>_from_raw` allocates a wrapper owning a caller-supplied handle.
//! - `atk_<kind>_is_valid` reports whether a handle is held; `NULL` is `false`.
//! - `atk_<kind>_release` returns the handle and leaves the wrapper empty.
//! - `atk_<kind>_destroy` disposes the handle and frees the wrapper.

use std::ffi::c_void;
use std::ptr;

use audio_toolbox_core::models::error::codes;
use audio_toolbox_core::{is_valid_ptr, OsStatus, StreamDescription, ToolboxError};

use super::panic_guard::{ffi_guard, ffi_guard_ptr};
use crate::policy::{AudioConverterWrapper, AudioFileWrapper, AuGraphWrapper, ExtAudioFileWrapper};
use crate::{au_graph, audio_converter};

macro_rules! export_wrapper {
    (
        $wrapper:ty,
        new_empty = $new_empty:ident,
        from_raw = $from_raw:ident,
        is_valid = $is_valid:ident,
        release = $release:ident,
        destroy = $destroy:ident $(,)?
    ) => {
        /// Allocates an empty wrapper. Free it with the matching `destroy`.
        #[unsafe(no_mangle)]
        pub extern "C" fn $new_empty() -> *mut $wrapper {
            ffi_guard_ptr! { Box::into_raw(Box::new(<$wrapper>::default())) }
        }

        /// Allocates a wrapper that takes ownership of `handle`.
        ///
        /// A `NULL` handle yields an empty wrapper.
        #[unsafe(no_mangle)]
        pub extern "C" fn $from_raw(handle: *mut c_void) -> *mut $wrapper {
            ffi_guard_ptr! {
                // Safety: the caller gives up sole ownership of `handle`.
                let wrapper = unsafe { <$wrapper>::from_raw(handle) };
                Box::into_raw(Box::new(wrapper))
            }
        }

        /// Returns `true` if the wrapper holds a live handle.
        #[unsafe(no_mangle)]
        pub extern "C" fn $is_valid(wrapper: *const $wrapper) -> bool {
            ffi_guard! { false;
                // Safety: `wrapper` is NULL or was allocated by this module.
                unsafe { is_valid_ptr(wrapper) }
            }
        }

        /// Hands the native handle to the caller, who must dispose it.
        ///
        /// Returns `NULL` if `wrapper` is `NULL` or empty.
        #[unsafe(no_mangle)]
        pub extern "C" fn $release(wrapper: *mut $wrapper) -> *mut c_void {
            ffi_guard_ptr! {
                // Safety: `wrapper` is NULL or was allocated by this module.
                match unsafe { wrapper.as_mut() } {
                    Some(w) => w.release().map_or(ptr::null_mut(), |h| h.as_raw()),
                    None => ptr::null_mut(),
                }
            }
        }

        /// Disposes the held handle, if any, and frees the wrapper.
        ///
        /// Passing `NULL` is a no-op.
        #[unsafe(no_mangle)]
        pub extern "C" fn $destroy(wrapper: *mut $wrapper) {
            ffi_guard! { ();
                if !wrapper.is_null() {
                    // Safety: allocated by Box::into_raw in this module and
                    // the caller guarantees single ownership.
                    drop(unsafe { Box::from_raw(wrapper) });
                }
            }
        }
    };
}

export_wrapper!(
    AudioConverterWrapper,
    new_empty = atk_audio_converter_new_empty,
    from_raw = atk_audio_converter_from_raw,
    is_valid = atk_audio_converter_is_valid,
    release = atk_audio_converter_release,
    destroy = atk_audio_converter_destroy,
);

export_wrapper!(
    AudioFileWrapper,
    new_empty = atk_audio_file_new_empty,
    from_raw = atk_audio_file_from_raw,
    is_valid = atk_audio_file_is_valid,
    release = atk_audio_file_release,
    destroy = atk_audio_file_destroy,
);

export_wrapper!(
    ExtAudioFileWrapper,
    new_empty = atk_ext_audio_file_new_empty,
    from_raw = atk_ext_audio_file_from_raw,
    is_valid = atk_ext_audio_file_is_valid,
    release = atk_ext_audio_file_release,
    destroy = atk_ext_audio_file_destroy,
);

export_wrapper!(
    AuGraphWrapper,
    new_empty = atk_au_graph_new_empty,
    from_raw = atk_au_graph_from_raw,
    is_valid = atk_au_graph_is_valid,
    release = atk_au_graph_release,
    destroy = atk_au_graph_destroy,
);

/// Writes the status behind `result` to `out_status`, if non-NULL.
fn report<T>(result: &Result<T, ToolboxError>, out_status: *mut i32) {
    let status = match result {
        Ok(_) => OsStatus::NO_ERR,
        Err(e) => e.status().unwrap_or(codes::PARAM),
    };
    // Safety: the caller passes NULL or a writable i32.
    if let Some(out) = unsafe { out_status.as_mut() } {
        *out = status.0;
    }
}

/// Creates a converter between two stream formats.
///
/// On failure returns `NULL` and writes the native status (or `paramErr` for
/// rejected formats) to `out_status`.
#[unsafe(no_mangle)]
pub extern "C" fn atk_audio_converter_new(
    source: *const StreamDescription,
    destination: *const StreamDescription,
    out_status: *mut i32,
) -> *mut AudioConverterWrapper {
    ffi_guard_ptr! {
        // Safety: the caller passes NULL or valid stream descriptions.
        let formats = unsafe { (source.as_ref(), destination.as_ref()) };
        let result = match formats {
            (Some(src), Some(dst)) => audio_converter::new(src, dst),
            _ => Err(ToolboxError::InvalidConfiguration("null stream description".into())),
        };
        report(&result, out_status);
        match result {
            Ok(converter) => Box::into_raw(Box::new(converter)),
            Err(e) => {
                log::warn!("{}", e);
                ptr::null_mut()
            }
        }
    }
}

/// Creates an empty processing graph.
///
/// On failure returns `NULL` and writes the native status to `out_status`.
#[unsafe(no_mangle)]
pub extern "C" fn atk_au_graph_new(out_status: *mut i32) -> *mut AuGraphWrapper {
    ffi_guard_ptr! {
        let result = au_graph::new();
        report(&result, out_status);
        match result {
            Ok(graph) => Box::into_raw(Box::new(graph)),
            Err(e) => {
                log::warn!("{}", e);
                ptr::null_mut()
            }
        }
    }
}
