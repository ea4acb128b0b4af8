//! Execution lock - interpreter-style serialization around native calls
//!
//! Design: One process-global reentrant lock models the host runtime's
//! serialization of dynamic-value access. A bridge holds it for all
//! argument inspection and result conversion, and releases it only for the
//! native call itself, so other threads may run while native code executes.
//!
//! Invariant: no dynamic value may be touched while the lock is released.
//! The closure passed to [`GilGuard::allow_threads`] must confine itself to
//! native data (raw pointers, lengths, scalars). This is a documented
//! contract, the same way the host runtime documents its own allow-threads
//! bracket.

use once_cell::sync::Lazy;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

use crate::logging::trace;

static LOCK: Lazy<ReentrantMutex<()>> = Lazy::new(|| ReentrantMutex::new(()));

/// Scoped hold on the global execution lock.
///
/// Dropping the guard releases this hold. The lock is reentrant: a thread
/// already holding it may acquire again, and the lock is fully released
/// only once every guard held by that thread is gone.
pub struct GilGuard {
    guard: Option<ReentrantMutexGuard<'static, ()>>,
}

impl GilGuard {
    /// Acquire the execution lock, blocking if another thread holds it.
    pub fn acquire() -> Self {
        Self {
            guard: Some(LOCK.lock()),
        }
    }

    /// Release this guard's hold for the duration of `f`, reacquiring
    /// before returning.
    ///
    /// `f` runs with the lock released and must not touch dynamic values;
    /// all conversion work happens before this call or after it returns.
    pub fn allow_threads<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        trace!(event = "lock_release");
        self.guard = None;

        let result = f();

        self.guard = Some(LOCK.lock());
        trace!(event = "lock_reacquire");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_is_reentrant() {
        let _outer = GilGuard::acquire();
        let _inner = GilGuard::acquire();
    }

    #[test]
    fn test_allow_threads_runs_closure_and_reacquires() {
        let mut gil = GilGuard::acquire();
        let out = gil.allow_threads(|| 41 + 1);
        assert_eq!(out, 42);

        // Guard must be held again after the bracket.
        assert!(gil.guard.is_some());
    }

    #[test]
    fn test_allow_threads_nested_under_outer_hold() {
        // An outer hold keeps the lock owned by this thread even while an
        // inner guard releases its own hold.
        let _outer = GilGuard::acquire();
        let mut inner = GilGuard::acquire();
        let out = inner.allow_threads(|| 7);
        assert_eq!(out, 7);
    }
}
