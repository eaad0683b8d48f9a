use std::fmt;

use super::error::{ErrorDomain, ToolboxError};

/// Builds a four-char code from its big-endian byte spelling, e.g. `fourcc(b"WAVE")`.
pub const fn fourcc(code: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*code)
}

fn is_printable(code: u32) -> bool {
    code.to_be_bytes().iter().all(|b| (0x20..=0x7e).contains(b))
}

fn quoted(code: u32) -> String {
    let chars: String = code.to_be_bytes().iter().map(|&b| b as char).collect();
    format!("'{}'", chars)
}

/// Formats a four-char code as `'WAVE'`, or as `0x` + eight hex digits when
/// any byte is unprintable.
pub fn fourcc_string(code: u32) -> String {
    if is_printable(code) {
        quoted(code)
    } else {
        format!("0x{:08X}", code)
    }
}

/// A native result code. Zero is success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct OsStatus(pub i32);

impl OsStatus {
    pub const NO_ERR: OsStatus = OsStatus(0);

    /// Status spelled as a four-char code, e.g. `OsStatus::from_fourcc(b"fmt?")`.
    pub const fn from_fourcc(code: &[u8; 4]) -> Self {
        Self(fourcc(code) as i32)
    }

    pub fn is_ok(&self) -> bool {
        self.0 == 0
    }

    /// Converts a status into a `Result`, attributing failures to `operation`.
    pub fn into_result(
        self,
        domain: ErrorDomain,
        operation: &'static str,
    ) -> Result<(), ToolboxError> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(ToolboxError::Status {
                domain,
                status: self,
                operation,
            })
        }
    }
}

impl From<i32> for OsStatus {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl fmt::Display for OsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.0;
        if is_printable(code as u32) {
            f.write_str(&quoted(code as u32))
        } else if code > -200_000 && code < 200_000 {
            write!(f, "{}", code)
        } else {
            write!(f, "0x{:08X}", code as u32)
        }
    }
}
