//! No-op native payload - the functions whose call overhead is measured
//!
//! The payload is deliberately trivial: the benchmark isolates marshalling
//! cost, so the native side contributes nothing measurable. Each entry
//! point records what it was called with in relaxed atomics so tests can
//! observe that (and with what) the boundary was crossed.

use core::ffi::{c_char, c_int, CStr};
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicI64, AtomicUsize, Ordering};

use once_cell::sync::Lazy;
use parking_lot::Mutex;

static F64_CALLS: AtomicUsize = AtomicUsize::new(0);
static STR_CALLS: AtomicUsize = AtomicUsize::new(0);
static VOID_CALLS: AtomicUsize = AtomicUsize::new(0);
static SINK_CALLS: AtomicUsize = AtomicUsize::new(0);
static PROCESS_CALLS: AtomicUsize = AtomicUsize::new(0);

static SINK_LAST_LEN: AtomicUsize = AtomicUsize::new(0);
static SINK_LAST_SUM: AtomicI64 = AtomicI64::new(0);

static FORCE_FAILURE: AtomicBool = AtomicBool::new(false);
static FORCED_ERROR_CODE: AtomicI32 = AtomicI32::new(0);

/// Bytes of the text argument the last `bridge_process` call observed;
/// `None` when the null pointer was delivered.
static PROCESS_LAST_TEXT: Lazy<Mutex<Option<Vec<u8>>>> = Lazy::new(|| Mutex::new(None));

/// Snapshot of native call observations
#[derive(Debug, Clone, Copy)]
pub struct NativeStats {
    pub f64_calls: usize,
    pub str_calls: usize,
    pub void_calls: usize,
    pub sink_calls: usize,
    pub process_calls: usize,
    /// Length the sink last received
    pub sink_last_len: usize,
    /// Wrapping element sum the sink last received
    pub sink_last_sum: i64,
}

/// Get native call statistics
pub fn stats() -> NativeStats {
    NativeStats {
        f64_calls: F64_CALLS.load(Ordering::Relaxed),
        str_calls: STR_CALLS.load(Ordering::Relaxed),
        void_calls: VOID_CALLS.load(Ordering::Relaxed),
        sink_calls: SINK_CALLS.load(Ordering::Relaxed),
        process_calls: PROCESS_CALLS.load(Ordering::Relaxed),
        sink_last_len: SINK_LAST_LEN.load(Ordering::Relaxed),
        sink_last_sum: SINK_LAST_SUM.load(Ordering::Relaxed),
    }
}

/// Text bytes the last `bridge_process` call observed (`None` for null)
pub fn last_process_text() -> Option<Vec<u8>> {
    PROCESS_LAST_TEXT.lock().clone()
}

/// Make subsequent `bridge_process` calls report failure with `code`
/// through the out-parameter. Lasts until [`clear_failure`].
pub fn force_failure(code: c_int) {
    FORCED_ERROR_CODE.store(code, Ordering::Relaxed);
    FORCE_FAILURE.store(true, Ordering::Relaxed);
}

/// Restore `bridge_process` to success
pub fn clear_failure() {
    FORCE_FAILURE.store(false, Ordering::Relaxed);
}

/// Identity on a double
#[no_mangle]
pub extern "C" fn bridge_identity_f64(x: f64) -> f64 {
    F64_CALLS.fetch_add(1, Ordering::Relaxed);
    x
}

/// Consume a NUL-terminated string, fixed return of 42
#[no_mangle]
pub extern "C" fn bridge_consume_str(text: *const c_char) -> c_int {
    STR_CALLS.fetch_add(1, Ordering::Relaxed);
    debug_assert!(!text.is_null());
    let _ = text;
    42
}

/// Void call with no arguments
#[no_mangle]
pub extern "C" fn bridge_constant() {
    VOID_CALLS.fetch_add(1, Ordering::Relaxed);
}

/// Sink for an integer array
#[no_mangle]
pub extern "C" fn bridge_int_list_sink(ptr: *const c_int, len: usize) {
    SINK_CALLS.fetch_add(1, Ordering::Relaxed);
    SINK_LAST_LEN.store(len, Ordering::Relaxed);

    let mut sum: i64 = 0;
    if !ptr.is_null() && len > 0 {
        let items = unsafe { core::slice::from_raw_parts(ptr, len) };
        for &v in items {
            sum = sum.wrapping_add(v as i64);
        }
    }
    SINK_LAST_SUM.store(sum, Ordering::Relaxed);
}

/// Process an integer array plus optional string; boolean-style status,
/// auxiliary error code via out-parameter
#[no_mangle]
pub extern "C" fn bridge_process(
    ptr: *const i32,
    len: usize,
    text: *const c_char,
    error: *mut c_int,
) -> c_int {
    PROCESS_CALLS.fetch_add(1, Ordering::Relaxed);
    let _ = (ptr, len);

    let observed = if text.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(text) }.to_bytes().to_vec())
    };
    *PROCESS_LAST_TEXT.lock() = observed;

    if FORCE_FAILURE.load(Ordering::Relaxed) {
        if !error.is_null() {
            unsafe {
                error.write(FORCED_ERROR_CODE.load(Ordering::Relaxed));
            }
        }
        return 0;
    }

    if !error.is_null() {
        unsafe {
            error.write(0);
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_identity_f64() {
        assert_eq!(bridge_identity_f64(3.5), 3.5);
        assert_eq!(bridge_identity_f64(-0.0), 0.0);
    }

    #[test]
    fn test_consume_str_fixed_return() {
        let s = CString::new("anything").unwrap();
        assert_eq!(bridge_consume_str(s.as_ptr()), 42);
    }

    #[test]
    fn test_sink_records_len_and_sum() {
        // Serialize against the bridge suite, which reads these globals.
        let _gil = crate::gil::GilGuard::acquire();
        let data: [c_int; 3] = [1, 2, 3];
        bridge_int_list_sink(data.as_ptr(), data.len());
        let stats = stats();
        assert_eq!(stats.sink_last_len, 3);
        assert_eq!(stats.sink_last_sum, 6);
    }

    #[test]
    fn test_process_success_and_forced_failure() {
        let _gil = crate::gil::GilGuard::acquire();
        let mut err: c_int = -1;
        let status = bridge_process(core::ptr::null(), 0, core::ptr::null(), &mut err);
        assert_eq!(status, 1);
        assert_eq!(err, 0);

        force_failure(9);
        let status = bridge_process(core::ptr::null(), 0, core::ptr::null(), &mut err);
        clear_failure();
        assert_eq!(status, 0);
        assert_eq!(err, 9);
    }
}
