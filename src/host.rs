use crate::foundation::error::{LutfxError, LutfxResult};

/// Host allocation capability.
///
/// The renderer obtains every long-lived buffer through this trait instead of
/// allocating implicitly, so embedders with constrained or instrumented heaps
/// can supply their own source of memory and observe failure as an error
/// rather than an abort.
pub trait FrameAllocator {
    /// Allocate a zeroed buffer of `len` 32-bit words.
    fn alloc_u32(&self, len: usize) -> LutfxResult<Vec<u32>>;
}

/// Default allocator backed by the process heap.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapAlloc;

impl FrameAllocator for HeapAlloc {
    fn alloc_u32(&self, len: usize) -> LutfxResult<Vec<u32>> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|e| LutfxError::allocation(format!("buffer of {len} words: {e}")))?;
        buf.resize(len, 0);
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_alloc_returns_zeroed_buffer() {
        let buf = HeapAlloc.alloc_u32(8).unwrap();
        assert_eq!(buf, vec![0u32; 8]);
    }

    #[test]
    fn heap_alloc_len_zero_is_fine() {
        assert!(HeapAlloc.alloc_u32(0).unwrap().is_empty());
    }
}
