/*!
 * Heap Compaction
 * Relocates live blocks to the bottom of the buffer
 */

use super::{HeapAllocator, HeapState};
use std::sync::Arc;
use tracing::{debug, info};

impl HeapAllocator {
    /// Slide every live block down to the lowest free offset.
    ///
    /// Afterwards all free space is one trailing extent. Returns the number of
    /// blocks that actually moved; handles observe their new position at once.
    pub fn defragment(&self) -> usize {
        let mut state = self.state.lock();
        self.compact_locked(&mut state)
    }

    pub(super) fn compact_locked(&self, state: &mut HeapState) -> usize {
        let mut live: Vec<_> = state.blocks.values().map(Arc::clone).collect();
        live.sort_by_key(|cell| cell.start());

        let mut cursor = 0;
        let mut moved = 0;
        // Highest byte left behind by a moved block
        let mut stale_end = 0;

        {
            let mut bytes = self.storage.write();
            for cell in &live {
                let start = cell.start();
                let size = cell.size();
                if start != cursor {
                    bytes.copy_within(start..start + size, cursor);
                    cell.relocate(cursor);
                    stale_end = stale_end.max(start + size);
                    moved += 1;
                    debug!(block_id = %cell.id(), from = start, to = cursor, size, "Relocated block");
                }
                cursor += size;
            }

            // Free bytes are kept zeroed, including ranges vacated by relocation
            if stale_end > cursor {
                bytes[cursor..stale_end].fill(0);
            }
        }

        state.free_list.reset_tail(cursor, self.config.total_size);

        info!(
            moved,
            live_blocks = live.len(),
            free_size = state.free_list.total(),
            "Compaction complete"
        );
        moved
    }
}
