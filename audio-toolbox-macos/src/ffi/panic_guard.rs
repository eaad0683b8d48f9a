//! Keeps panics from unwinding into foreign frames.

/// Runs an FFI body, returning `$fallback` if it panics.
macro_rules! ffi_guard {
    ($fallback:expr; $($body:tt)*) => {{
        use std::panic;
        use std::panic::AssertUnwindSafe;

        match panic::catch_unwind(AssertUnwindSafe(move || { $($body)* })) {
            Ok(result) => result,
            Err(_) => {
                log::error!("panic caught at the C boundary");
                $fallback
            }
        }
    }};
}

/// Runs an FFI body that returns a pointer; `NULL` if it panics.
macro_rules! ffi_guard_ptr {
    ($($body:tt)*) => {{
        use std::panic;
        use std::panic::AssertUnwindSafe;
        use std::ptr;

        match panic::catch_unwind(AssertUnwindSafe(move || { $($body)* })) {
            Ok(result) => result,
            Err(_) => {
                log::error!("panic caught at the C boundary");
                ptr::null_mut()
            }
        }
    }};
}

pub(crate) use ffi_guard;
pub(crate) use ffi_guard_ptr;

#[cfg(test)]
mod tests {
    #[test]
    fn guard_passes_value_through() {
        let value: i32 = ffi_guard! { -1; 7 };
        assert_eq!(value, 7);
    }

    #[test]
    fn guard_returns_fallback_on_panic() {
        let valid: bool = ffi_guard! { false;
            panic!("boom");
        };
        assert!(!valid);
    }

    #[test]
    fn ptr_guard_returns_null_on_panic() {
        let ptr: *mut u8 = ffi_guard_ptr! {
            panic!("boom");
        };
        assert!(ptr.is_null());
    }
}
