//! Composite bridge - integer sequence plus optional text, status result
//!
//! The heaviest path: dual-representation text handling, 32-bit element
//! conversion, and structured status translation. The transcoded text
//! temporary and the integer buffer are distinct allocations; both are
//! released on every exit, including conversion failures between the two.

use core::ffi::c_int;
use std::ffi::CString;
use std::ptr;

use super::expect_arity;
use crate::buffer::NativeBuffer;
use crate::error::{BridgeError, BridgeResult};
use crate::gil::GilGuard;
use crate::logging::log_native_call;
use crate::native;
use crate::value::Value;

pub struct CompositeBridge;

impl CompositeBridge {
    /// `call(sequence_of_int, text_or_none) -> int`, raising on native failure.
    pub fn call(args: &[Value]) -> BridgeResult<Value> {
        let mut gil = GilGuard::acquire();
        expect_arity(args, 2)?;

        // Text first, as the original wrapper orders it. The temporary
        // lives until this frame unwinds, so element-conversion failures
        // below release it along with the integer buffer.
        let text = text_to_native(&args[1])?;

        let items = match &args[0] {
            Value::List(items) => items,
            other => {
                return Err(BridgeError::TypeMismatch {
                    expected: "list",
                    got: other.type_name(),
                })
            }
        };

        let mut buffer = NativeBuffer::<i32>::try_new(items.len())?;

        for (i, item) in items.iter().enumerate() {
            let v = item.as_int().ok_or(BridgeError::TypeMismatch {
                expected: "int",
                got: item.type_name(),
            })?;
            if v < i32::MIN as i64 || v > i32::MAX as i64 {
                return Err(BridgeError::Overflow { value: v });
            }
            buffer.write(i, v as i32);
        }

        let text_ptr = text.as_ref().map_or(ptr::null(), |c| c.as_ptr());
        let (buf_ptr, len) = (buffer.as_ptr(), buffer.len());
        let mut error_code: c_int = 0;
        let error_out = &mut error_code as *mut c_int;

        log_native_call("bridge_process", len);
        let status = gil.allow_threads(|| native::bridge_process(buf_ptr, len, text_ptr, error_out));

        // Both allocations are released when this frame exits, whichever
        // branch is taken below.
        if status == 0 {
            return Err(BridgeError::NativeCallFailed { code: error_code });
        }
        Ok(Value::Int(status as i64))
    }
}

/// Collapse either string representation to one NUL-terminated byte form.
///
/// `None` maps to "no string" (a null pointer at the call site) and
/// allocates nothing. The wide representation transcodes its UTF-8 text;
/// the narrow representation is copied as-is. Interior NUL bytes cannot be
/// represented in the native form and are rejected.
fn text_to_native(value: &Value) -> BridgeResult<Option<CString>> {
    match value {
        Value::None => Ok(None),
        Value::Str(s) => CString::new(s.as_bytes())
            .map(Some)
            .map_err(|_| BridgeError::TypeMismatch {
                expected: "str without interior NUL",
                got: "str",
            }),
        Value::Bytes(b) => CString::new(b.as_slice())
            .map(Some)
            .map_err(|_| BridgeError::TypeMismatch {
                expected: "bytes without interior NUL",
                got: "bytes",
            }),
        other => Err(BridgeError::TypeMismatch {
            expected: "str, bytes, or None",
            got: other.type_name(),
        }),
    }
}
