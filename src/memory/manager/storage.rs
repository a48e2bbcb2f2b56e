/*!
 * Heap Storage
 * The simulated physical memory backing every block
 */

use crate::core::types::Size;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Fixed-size byte buffer shared between an allocator and its block handles.
///
/// Readers share the lock; writes, zero-fill and relocation take it exclusively,
/// so a block's position and its bytes are always observed together.
pub(crate) struct HeapStorage {
    bytes: RwLock<Box<[u8]>>,
}

impl HeapStorage {
    pub fn zeroed(size: Size) -> Self {
        Self {
            bytes: RwLock::new(vec![0u8; size].into_boxed_slice()),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Box<[u8]>> {
        self.bytes.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Box<[u8]>> {
        self.bytes.write()
    }

    /// Whether every byte in `range` is zero
    #[cfg(test)]
    pub fn is_zeroed(&self, range: std::ops::Range<usize>) -> bool {
        self.read()[range].iter().all(|&b| b == 0)
    }
}
