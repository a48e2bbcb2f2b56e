/*!
 * Heap Management
 *
 * Simulated heap over a fixed-size byte buffer.
 *
 * ## Allocation
 *
 * - **First-fit**: free extents are scanned in list order and the first one
 *   large enough is split; the remainder is appended to the list
 * - **Compaction on exhaustion**: when nothing fits, live blocks are slid to
 *   the bottom of the buffer and the search is retried once
 *
 * ## Release
 *
 * - **Zero-on-free**: a released range is cleared before it can be reused
 * - **Coalescing**: the free list is sorted by offset and adjacent extents
 *   are merged after every release and compaction
 *
 * ## Locking
 *
 * Bookkeeping (live blocks, free list, id counter) sits behind one mutex held
 * for the whole of every operation. Block I/O never touches it; it only takes
 * the storage lock, which compaction holds exclusively while relocating.
 * Lock order is always bookkeeping, then storage.
 */

mod allocator;
mod compaction;
mod free_list;
mod stats;
pub(crate) mod storage;

use super::block::BlockCell;
use super::traits::{Allocator, HeapInfo};
use super::types::{HeapResult, HeapStats};
use super::Block;
use crate::core::config::{ConfigError, HeapConfig};
use crate::core::types::{BlockId, Size};
use ahash::RandomState;
use free_list::FreeList;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use storage::HeapStorage;
use tracing::info;

/// Bookkeeping guarded by the heap lock
#[derive(Default)]
struct HeapState {
    blocks: HashMap<BlockId, Arc<BlockCell>, RandomState>,
    free_list: FreeList,
    allocated: Size,
    next_id: u64,
}

impl HeapState {
    fn new(total: Size) -> Self {
        Self {
            free_list: FreeList::covering(total),
            ..Self::default()
        }
    }

    fn allocated_total(&self) -> Size {
        self.allocated
    }

    fn next_block_id(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Simulated heap allocator
///
/// Clones share the same heap.
pub struct HeapAllocator {
    config: HeapConfig,
    storage: Arc<HeapStorage>,
    state: Arc<Mutex<HeapState>>,
}

impl HeapAllocator {
    /// Create a heap of `total_size` bytes with default settings
    pub fn new(total_size: Size) -> Self {
        Self::build(HeapConfig::with_capacity(total_size))
    }

    /// Create a heap from a validated configuration
    pub fn with_config(config: HeapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: HeapConfig) -> Self {
        info!(
            total_size = config.total_size,
            auto_compact = config.auto_compact,
            "Heap initialized with first-fit free list"
        );
        Self {
            config,
            storage: Arc::new(HeapStorage::zeroed(config.total_size)),
            state: Arc::new(Mutex::new(HeapState::new(config.total_size))),
        }
    }

    pub fn config(&self) -> &HeapConfig {
        &self.config
    }

    pub fn total_size(&self) -> Size {
        self.config.total_size
    }
}

// Implement trait interfaces
impl Allocator for HeapAllocator {
    fn allocate(&self, size: Size) -> HeapResult<Block> {
        HeapAllocator::allocate(self, size)
    }

    fn release(&self, block: &Block) -> HeapResult<()> {
        HeapAllocator::release(self, block)
    }

    fn defragment(&self) -> usize {
        HeapAllocator::defragment(self)
    }
}

impl HeapInfo for HeapAllocator {
    fn total_size(&self) -> Size {
        HeapAllocator::total_size(self)
    }

    fn allocated_size(&self) -> Size {
        HeapAllocator::allocated_size(self)
    }

    fn free_size(&self) -> Size {
        HeapAllocator::free_size(self)
    }

    fn stats(&self) -> HeapStats {
        HeapAllocator::stats(self)
    }
}

impl Clone for HeapAllocator {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            storage: Arc::clone(&self.storage),
            state: Arc::clone(&self.state),
        }
    }
}

impl Default for HeapAllocator {
    fn default() -> Self {
        Self::build(HeapConfig::default())
    }
}

impl std::fmt::Debug for HeapAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("HeapAllocator")
            .field("total_size", &self.config.total_size)
            .field("allocated_blocks", &state.blocks.len())
            .field("free_extents", &state.free_list.extents())
            .finish()
    }
}
