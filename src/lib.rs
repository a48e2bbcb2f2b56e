/*!
 * simheap
 * Software-simulated heap allocator exposed as a library
 */

pub mod core;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use crate::core::{BlockId, ConfigError, HeapConfig, Offset, Size};
pub use memory::{
    Access, Allocator, Block, FreeExtent, Heap, HeapAllocator, HeapError, HeapInfo, HeapResult,
    HeapStats, MemoryPressure,
};
pub use monitoring::init_tracing;
