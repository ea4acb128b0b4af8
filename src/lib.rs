//! callbridge - measures the cost of crossing the dynamic/native boundary
//!
//! A managed caller passes dynamically-typed arguments (scalars, strings,
//! variable-length sequences) into native code that performs negligible
//! work, so the marshalling cost dominates and can be benchmarked in
//! isolation. Everything of substance lives in the bridges: argument
//! validation, buffer population, lock release and reacquisition, result
//! conversion, and deterministic cleanup on every path.

pub mod bridge;
pub mod buffer;
pub mod error;
pub mod gil;
pub mod logging;
pub mod native;
pub mod value;

// Re-export core types
pub use bridge::{CompositeBridge, ScalarBridge, SequenceBridge};
pub use error::{BridgeError, BridgeResult};
pub use gil::GilGuard;
pub use value::Value;

/// Crate initialization (logging only; the bridges carry no state across calls)
pub fn init() {
    logging::init();
}

/// C-linkage initialization for embedding hosts
#[no_mangle]
pub extern "C" fn callbridge_init() {
    init();
}
