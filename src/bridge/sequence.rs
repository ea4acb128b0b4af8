//! Sequence bridge - dynamic integer sequence into a native array
//!
//! Conversion is eager and strictly in order: the native sink needs one
//! contiguous array, so the whole buffer is materialized before the call.
//! Setup cost stays O(n) conversions with no backtracking.

use core::ffi::c_int;

use super::expect_arity;
use crate::buffer::NativeBuffer;
use crate::error::{BridgeError, BridgeResult};
use crate::gil::GilGuard;
use crate::logging::log_native_call;
use crate::native;
use crate::value::Value;

pub struct SequenceBridge;

impl SequenceBridge {
    /// `call(sequence_of_int) -> None`
    ///
    /// The first conversion failure drops the buffer and propagates; the
    /// native sink is never invoked with partially-converted data.
    pub fn call(args: &[Value]) -> BridgeResult<Value> {
        let mut gil = GilGuard::acquire();
        expect_arity(args, 1)?;

        let items = match &args[0] {
            Value::List(items) => items,
            other => {
                return Err(BridgeError::TypeMismatch {
                    expected: "list",
                    got: other.type_name(),
                })
            }
        };

        // Length is read once; the buffer never grows past it.
        let mut buffer = NativeBuffer::<c_int>::try_new(items.len())?;

        for (i, item) in items.iter().enumerate() {
            let v = item.as_int().ok_or(BridgeError::TypeMismatch {
                expected: "int",
                got: item.type_name(),
            })?;
            if v < c_int::MIN as i64 || v > c_int::MAX as i64 {
                return Err(BridgeError::Overflow { value: v });
            }
            buffer.write(i, v as c_int);
        }

        log_native_call("bridge_int_list_sink", buffer.len());
        let (ptr, len) = (buffer.as_ptr(), buffer.len());
        gil.allow_threads(|| native::bridge_int_list_sink(ptr, len));

        // `buffer` is dropped here, after the call returned.
        Ok(Value::None)
    }
}
