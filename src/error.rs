//! Bridge error taxonomy
//!
//! Every failure a dynamic caller can trigger maps to one of four kinds.
//! Errors are raised synchronously to the immediate caller; nothing is
//! retried or silently recovered, and conversion errors abort before the
//! native side is ever invoked.

use core::fmt;

/// Result alias for all bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Bridge call failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// A dynamic argument's runtime kind does not match the expected
    /// contract, or the argument count is wrong.
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
    /// An integer element falls outside the native target type's range.
    Overflow { value: i64 },
    /// Native buffer allocation failed.
    OutOfMemory { bytes: usize },
    /// The native function reported failure via its status return.
    ///
    /// The auxiliary out-parameter error code is preserved for inspection;
    /// the rendered message stays generic.
    NativeCallFailed { code: i32 },
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {}, got {}", expected, got)
            }
            Self::Overflow { value } => {
                write!(f, "{} out of range for native int", value)
            }
            Self::OutOfMemory { bytes } => {
                write!(f, "failed to allocate native buffer of {} bytes", bytes)
            }
            Self::NativeCallFailed { .. } => write!(f, "native call reported failure"),
        }
    }
}

impl std::error::Error for BridgeError {}
