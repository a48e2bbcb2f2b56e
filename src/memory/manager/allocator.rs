/*!
 * Heap Allocator Implementation
 * Allocation and release logic
 */

use super::super::block::{Block, BlockCell};
use super::super::types::{FreeExtent, HeapError, HeapResult, MemoryPressure};
use super::HeapAllocator;
use crate::core::types::Size;
use std::sync::Arc;
use tracing::{debug, error, warn};

impl HeapAllocator {
    /// Allocate `size` bytes using first-fit over the free list.
    ///
    /// If no extent fits and auto-compaction is enabled, the heap is compacted
    /// and the search retried once before reporting out of memory.
    pub fn allocate(&self, size: Size) -> HeapResult<Block> {
        if size == 0 {
            return Err(HeapError::InvalidSize { size });
        }

        let mut state = self.state.lock();

        let mut index = state.free_list.find_first_fit(size);
        if index.is_none() && self.config.auto_compact {
            debug!(requested = size, "No free extent fits, compacting heap");
            self.compact_locked(&mut state);
            index = state.free_list.find_first_fit(size);
        }

        let Some(index) = index else {
            let available = state.free_list.total();
            error!(
                requested = size,
                available,
                free_extents = state.free_list.len(),
                "OOM: no free extent large enough"
            );
            return Err(HeapError::OutOfMemory {
                requested: size,
                available,
            });
        };

        let start = state.free_list.take(index, size);
        let id = state.next_block_id();
        let cell = Arc::new(BlockCell::new(id, start, size, Arc::clone(&self.storage)));
        state.blocks.insert(id, Arc::clone(&cell));
        state.allocated += size;

        let used = state.allocated_total();
        drop(state);

        match self.pressure_for(used) {
            level @ (MemoryPressure::High | MemoryPressure::Critical) => warn!(
                block_id = %id,
                size,
                start,
                used,
                total = self.config.total_size,
                "Memory pressure {}",
                level
            ),
            _ => debug!(block_id = %id, size, start, "Allocated block"),
        }

        Ok(Block::from_cell(cell))
    }

    /// Release a block back to the free list.
    ///
    /// The block's bytes are zeroed before the range becomes reusable.
    pub fn release(&self, block: &Block) -> HeapResult<()> {
        let mut state = self.state.lock();

        let tracked = state
            .blocks
            .get(&block.id())
            .is_some_and(|cell| Arc::ptr_eq(cell, block.cell()));

        if !tracked {
            let block_id = block.id();
            if block.is_freed() {
                warn!(block_id = %block_id, "Rejected double free");
                return Err(HeapError::DoubleFree { block_id });
            }
            warn!(block_id = %block_id, "Rejected release of block not managed by this heap");
            return Err(HeapError::InvalidBlock { block_id });
        }

        let cell = block.cell();
        let start = cell.start();
        let size = cell.size();
        {
            let mut bytes = self.storage.write();
            bytes[start..start + size].fill(0);
            cell.mark_freed();
        }

        state.blocks.remove(&cell.id());
        state.allocated -= size;
        state.free_list.release(FreeExtent::new(start, size));

        debug!(
            block_id = %cell.id(),
            start,
            size,
            free_extents = state.free_list.len(),
            free_size = state.free_list.total(),
            "Released block"
        );

        Ok(())
    }

    /// Whether this heap currently tracks `block` as live
    pub fn is_allocated(&self, block: &Block) -> bool {
        self.state
            .lock()
            .blocks
            .get(&block.id())
            .is_some_and(|cell| Arc::ptr_eq(cell, block.cell()))
    }
}
