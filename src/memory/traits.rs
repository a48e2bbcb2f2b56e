/*!
 * Memory Traits
 * Heap management abstractions
 */

use super::block::Block;
use super::types::*;
use crate::core::types::Size;

/// Heap allocator interface
pub trait Allocator: Send + Sync {
    /// Allocate a block of `size` bytes
    fn allocate(&self, size: Size) -> HeapResult<Block>;

    /// Return a block to the free pool
    fn release(&self, block: &Block) -> HeapResult<()>;

    /// Compact live blocks, returning how many moved
    fn defragment(&self) -> usize;
}

/// Heap statistics provider
pub trait HeapInfo: Send + Sync {
    fn total_size(&self) -> Size;

    fn allocated_size(&self) -> Size;

    fn free_size(&self) -> Size;

    /// Get overall heap statistics
    fn stats(&self) -> HeapStats;

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}

/// Heap trait combining all interfaces
pub trait Heap: Allocator + HeapInfo + Clone {}

/// Implement Heap for types that implement all required traits
impl<T> Heap for T where T: Allocator + HeapInfo + Clone {}
