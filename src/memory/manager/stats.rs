/*!
 * Heap Statistics
 * Aggregate queries over heap bookkeeping
 */

use super::super::types::{FreeExtent, HeapStats, MemoryPressure};
use super::HeapAllocator;
use crate::core::limits::MEDIUM_PRESSURE_THRESHOLD;
use crate::core::types::Size;

impl HeapAllocator {
    /// Bytes held by live blocks
    pub fn allocated_size(&self) -> Size {
        self.state.lock().allocated_total()
    }

    /// Bytes in free extents, contiguous or not
    pub fn free_size(&self) -> Size {
        self.state.lock().free_list.total()
    }

    pub fn allocated_blocks(&self) -> usize {
        self.state.lock().blocks.len()
    }

    pub fn largest_free_extent(&self) -> Size {
        self.state.lock().free_list.largest()
    }

    /// Snapshot of the free list in list order
    pub fn free_extents(&self) -> Vec<FreeExtent> {
        self.state.lock().free_list.extents().to_vec()
    }

    /// Consistent snapshot of all aggregates
    pub fn stats(&self) -> HeapStats {
        let state = self.state.lock();
        let total = self.config.total_size;
        let allocated = state.allocated_total();
        let free = state.free_list.total();
        let largest = state.free_list.largest();

        HeapStats {
            total_size: total,
            allocated_size: allocated,
            free_size: free,
            usage_percentage: usage_ratio(allocated, total) * 100.0,
            allocated_blocks: state.blocks.len(),
            free_extents: state.free_list.len(),
            largest_free_extent: largest,
            fragmentation: if free == 0 {
                0.0
            } else {
                1.0 - largest as f64 / free as f64
            },
            warning_threshold: self.config.warning_threshold,
            critical_threshold: self.config.critical_threshold,
        }
    }

    pub fn pressure(&self) -> MemoryPressure {
        self.pressure_for(self.allocated_size())
    }

    pub(super) fn pressure_for(&self, used: Size) -> MemoryPressure {
        let ratio = usage_ratio(used, self.config.total_size);

        if ratio >= self.config.critical_threshold {
            MemoryPressure::Critical
        } else if ratio >= self.config.warning_threshold {
            MemoryPressure::High
        } else if ratio >= MEDIUM_PRESSURE_THRESHOLD {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

fn usage_ratio(used: Size, total: Size) -> f64 {
    if total == 0 {
        0.0
    } else {
        used as f64 / total as f64
    }
}
