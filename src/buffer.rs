//! Native buffer - call-scoped contiguous allocations
//!
//! Design: Element count fixed at allocation, release tied to scope exit:
//! - Allocated with an explicit `Layout`, freed exactly once in `Drop`
//! - Early-exit error paths release through the same drop guard as the
//!   success path; there are no manual free calls at error sites
//! - Zero-length buffers never touch the allocator
//! - Atomic counters back the leak assertions in tests

use std::alloc::{alloc, dealloc, Layout};
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{BridgeError, BridgeResult};
use crate::logging::trace;

static BUFFERS_ALLOCATED: AtomicUsize = AtomicUsize::new(0);
static BUFFERS_FREED: AtomicUsize = AtomicUsize::new(0);

/// Allocation statistics for monitoring and leak checks
#[derive(Debug, Clone, Copy)]
pub struct BufferStats {
    pub allocated: usize,
    pub freed: usize,
}

impl BufferStats {
    /// Buffers currently alive
    #[inline]
    pub fn live(&self) -> usize {
        self.allocated.saturating_sub(self.freed)
    }
}

/// Get buffer allocation statistics
pub fn stats() -> BufferStats {
    BufferStats {
        allocated: BUFFERS_ALLOCATED.load(Ordering::Relaxed),
        freed: BUFFERS_FREED.load(Ordering::Relaxed),
    }
}

/// Fixed-length native array owned by one bridge invocation.
///
/// The element count is fixed when the buffer is created and never changes;
/// population happens element-by-element through [`write`](Self::write).
pub struct NativeBuffer<T: Copy> {
    ptr: NonNull<T>,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T: Copy> NativeBuffer<T> {
    /// Allocate a buffer of `len` elements.
    pub fn try_new(len: usize) -> BridgeResult<Self> {
        if len == 0 {
            BUFFERS_ALLOCATED.fetch_add(1, Ordering::Relaxed);
            return Ok(Self {
                ptr: NonNull::dangling(),
                len: 0,
                _marker: PhantomData,
            });
        }

        let layout = Layout::array::<T>(len).map_err(|_| BridgeError::OutOfMemory {
            bytes: usize::MAX,
        })?;

        let raw = unsafe { alloc(layout) as *mut T };
        let ptr = match NonNull::new(raw) {
            Some(ptr) => ptr,
            None => {
                return Err(BridgeError::OutOfMemory {
                    bytes: layout.size(),
                })
            }
        };

        BUFFERS_ALLOCATED.fetch_add(1, Ordering::Relaxed);
        trace!(
            event = "buffer_alloc",
            elements = len,
            bytes = layout.size(),
            address = ?ptr.as_ptr(),
        );

        Ok(Self {
            ptr,
            len,
            _marker: PhantomData,
        })
    }

    /// Element count, fixed at allocation
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Write element `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range. The bridges only index within the
    /// sequence length the buffer was sized from.
    #[inline]
    pub fn write(&mut self, index: usize, value: T) {
        assert!(index < self.len, "buffer index out of range");
        unsafe {
            self.ptr.as_ptr().add(index).write(value);
        }
    }

    /// Raw pointer for the native call
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// View the populated buffer as a slice
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy> Drop for NativeBuffer<T> {
    fn drop(&mut self) {
        BUFFERS_FREED.fetch_add(1, Ordering::Relaxed);

        if self.len == 0 {
            return;
        }

        // The layout was validated when the allocation succeeded.
        let layout = unsafe {
            Layout::from_size_align_unchecked(
                self.len * std::mem::size_of::<T>(),
                std::mem::align_of::<T>(),
            )
        };

        trace!(
            event = "buffer_free",
            elements = self.len,
            address = ?self.ptr.as_ptr(),
        );

        unsafe {
            dealloc(self.ptr.as_ptr() as *mut u8, layout);
        }
    }
}
