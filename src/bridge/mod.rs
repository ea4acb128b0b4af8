//! Argument marshalling bridges - dynamic values across the native boundary
//!
//! Design: Every bridge is one call path with the same shape: parse dynamic
//! arguments, convert element-by-element into native fixed-layout buffers,
//! release the execution lock, invoke the native payload, reacquire the
//! lock, convert the result back. A conversion failure short-circuits
//! before the native call ever happens, and buffer release is tied to
//! scope exit on every path.
//!
//! Architecture:
//! - `scalar.rs` - single string/float argument, and the bare void call
//! - `sequence.rs` - integer sequence into a native array
//! - `composite.rs` - integer sequence plus optional dual-representation text

mod composite;
mod scalar;
mod sequence;

pub use composite::CompositeBridge;
pub use scalar::ScalarBridge;
pub use sequence::SequenceBridge;

use crate::error::{BridgeError, BridgeResult};
use crate::value::Value;

/// Check the supplied argument count against the declared arity.
fn expect_arity(args: &[Value], arity: usize) -> BridgeResult<()> {
    if args.len() == arity {
        Ok(())
    } else {
        Err(BridgeError::TypeMismatch {
            expected: count_name(arity),
            got: count_name(args.len()),
        })
    }
}

const fn count_name(n: usize) -> &'static str {
    match n {
        0 => "no arguments",
        1 => "1 argument",
        2 => "2 arguments",
        _ => "3 or more arguments",
    }
}
