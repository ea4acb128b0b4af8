//! Scalar bridge - single string or float argument, trivial native result
//!
//! No buffer is needed beyond the scalar itself (the string variant owns a
//! short-lived NUL-terminated temporary). The no-argument variant performs
//! no conversion at all; it exists so the bare release/call/reacquire
//! bracket can be measured on its own.

use std::ffi::CString;

use super::expect_arity;
use crate::error::{BridgeError, BridgeResult};
use crate::gil::GilGuard;
use crate::logging::log_native_call;
use crate::native;
use crate::value::Value;

pub struct ScalarBridge;

impl ScalarBridge {
    /// `call(text) -> int`: fixed native response, string content ignored.
    pub fn call_str(args: &[Value]) -> BridgeResult<Value> {
        let mut gil = GilGuard::acquire();
        expect_arity(args, 1)?;

        let text = match &args[0] {
            Value::Str(s) => {
                CString::new(s.as_bytes()).map_err(|_| BridgeError::TypeMismatch {
                    expected: "str without interior NUL",
                    got: "str",
                })?
            }
            other => {
                return Err(BridgeError::TypeMismatch {
                    expected: "str",
                    got: other.type_name(),
                })
            }
        };

        log_native_call("bridge_consume_str", 1);
        let ptr = text.as_ptr();
        let status = gil.allow_threads(|| native::bridge_consume_str(ptr));

        // `text` is released when this frame unwinds, after the call.
        Ok(Value::Int(status as i64))
    }

    /// `call(value) -> float`: identity round-trip through the payload.
    pub fn call_f64(args: &[Value]) -> BridgeResult<Value> {
        let mut gil = GilGuard::acquire();
        expect_arity(args, 1)?;

        let x = match &args[0] {
            Value::Float(x) => *x,
            other => {
                return Err(BridgeError::TypeMismatch {
                    expected: "float",
                    got: other.type_name(),
                })
            }
        };

        log_native_call("bridge_identity_f64", 1);
        let result = gil.allow_threads(|| native::bridge_identity_f64(x));
        Ok(Value::Float(result))
    }

    /// `call() -> None`: the empty bracket, no conversion at all.
    pub fn call_void(args: &[Value]) -> BridgeResult<Value> {
        let mut gil = GilGuard::acquire();
        expect_arity(args, 0)?;

        log_native_call("bridge_constant", 0);
        gil.allow_threads(|| native::bridge_constant());
        Ok(Value::None)
    }
}
