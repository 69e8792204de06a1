//! Reusable byte-buffer pool shared by the frame generator

use bytes::BytesMut;
use std::sync::Mutex;

/// Upper bound on retained free buffers
const MAX_POOLED: usize = 64;

/// Pool of reusable [`BytesMut`] buffers
///
/// Buffers are handed out at the configured capacity and cleared on release.
/// The free list is bounded so a burst of connections cannot pin memory.
pub struct BufferPool {
    capacity: usize,
    free: Mutex<Vec<BytesMut>>,
}

impl BufferPool {
    /// Create a pool handing out buffers of `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            free: Mutex::new(Vec::new()),
        }
    }

    /// Buffer capacity handed out by this pool
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take a buffer from the pool, allocating when the free list is empty
    pub fn acquire(&self) -> BytesMut {
        if let Ok(mut free) = self.free.lock() {
            if let Some(buf) = free.pop() {
                return buf;
            }
        }
        BytesMut::with_capacity(self.capacity)
    }

    /// Return a buffer to the pool
    pub fn release(&self, mut buf: BytesMut) {
        buf.clear();
        if let Ok(mut free) = self.free.lock() {
            if free.len() < MAX_POOLED {
                free.push(buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_release_reuses_buffer() {
        let pool = BufferPool::new(1024);

        let mut buf = pool.acquire();
        assert!(buf.capacity() >= 1024);
        buf.extend_from_slice(b"hello");
        pool.release(buf);

        let buf = pool.acquire();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_free_list_is_bounded() {
        let pool = BufferPool::new(16);
        for _ in 0..(MAX_POOLED * 2) {
            pool.release(BytesMut::with_capacity(16));
        }
        let retained = pool.free.lock().unwrap().len();
        assert!(retained <= MAX_POOLED);
    }
}
