/*!
 * Free List
 * First-fit list of reclaimable extents
 */

use super::super::types::FreeExtent;
use crate::core::types::{Offset, Size};

/// Free extents in list order.
///
/// The order is insertion order: remainders of split extents are appended and
/// the list is only sorted by start when a block is released. First-fit search
/// therefore depends on allocation history until compaction resets the list.
#[derive(Debug, Default)]
pub(super) struct FreeList {
    extents: Vec<FreeExtent>,
}

impl FreeList {
    /// A list covering `[0, total)`, empty for a zero-sized heap
    pub fn covering(total: Size) -> Self {
        let mut list = Self::default();
        list.reset_tail(0, total);
        list
    }

    /// Index of the first extent large enough for `size`
    pub fn find_first_fit(&self, size: Size) -> Option<usize> {
        self.extents.iter().position(|extent| extent.size >= size)
    }

    /// Carve `size` bytes from the front of the extent at `index`.
    ///
    /// The extent is removed and any remainder is appended to the end of the list.
    pub fn take(&mut self, index: usize, size: Size) -> Offset {
        let extent = self.extents.remove(index);
        debug_assert!(extent.size >= size);

        let remaining = extent.size - size;
        if remaining > 0 {
            self.extents
                .push(FreeExtent::new(extent.start + size, remaining));
        }
        extent.start
    }

    /// Return a released range, then restore sorted, coalesced order
    pub fn release(&mut self, extent: FreeExtent) {
        self.extents.push(extent);
        self.extents.sort_by_key(|e| e.start);
        self.coalesce();
    }

    /// Merge each extent into its predecessor when they touch.
    /// Expects the list sorted by start.
    pub fn coalesce(&mut self) {
        if self.extents.len() < 2 {
            return;
        }

        let mut merged: Vec<FreeExtent> = Vec::with_capacity(self.extents.len());
        for extent in self.extents.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.end() == extent.start => prev.size += extent.size,
                _ => merged.push(extent),
            }
        }
        self.extents = merged;
    }

    /// Replace the whole list with the single extent `[start, total)`
    pub fn reset_tail(&mut self, start: Offset, total: Size) {
        self.extents.clear();
        if start < total {
            self.extents.push(FreeExtent::new(start, total - start));
        }
    }

    pub fn total(&self) -> Size {
        self.extents.iter().map(|e| e.size).sum()
    }

    pub fn largest(&self) -> Size {
        self.extents.iter().map(|e| e.size).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn extents(&self) -> &[FreeExtent] {
        &self.extents
    }
}
