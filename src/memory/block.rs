/*!
 * Memory Blocks
 * Handles to live allocations inside a simulated heap
 */

use super::manager::storage::HeapStorage;
use super::types::{Access, HeapError, HeapResult};
use crate::core::types::{BlockId, Offset, Size};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Allocator-owned state of one block.
///
/// `start` is rewritten only by compaction, while the storage write lock is held.
/// `freed` flips once, during release, under the same lock.
pub(crate) struct BlockCell {
    id: BlockId,
    size: Size,
    start: AtomicUsize,
    freed: AtomicBool,
    storage: Arc<HeapStorage>,
}

impl BlockCell {
    pub(crate) fn new(id: BlockId, start: Offset, size: Size, storage: Arc<HeapStorage>) -> Self {
        Self {
            id,
            size,
            start: AtomicUsize::new(start),
            freed: AtomicBool::new(false),
            storage,
        }
    }

    #[inline]
    pub(crate) fn id(&self) -> BlockId {
        self.id
    }

    #[inline]
    pub(crate) fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub(crate) fn start(&self) -> Offset {
        self.start.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn is_freed(&self) -> bool {
        self.freed.load(Ordering::Acquire)
    }

    pub(crate) fn relocate(&self, new_start: Offset) {
        self.start.store(new_start, Ordering::Release);
    }

    pub(crate) fn mark_freed(&self) {
        self.freed.store(true, Ordering::Release);
    }
}

/// Handle to one allocated region of a heap.
///
/// Cloning the handle does not copy the allocation; every clone refers to the
/// same block and observes relocation by compaction immediately.
#[derive(Clone)]
pub struct Block {
    cell: Arc<BlockCell>,
}

impl Block {
    pub(crate) fn from_cell(cell: Arc<BlockCell>) -> Self {
        Self { cell }
    }

    pub(crate) fn cell(&self) -> &Arc<BlockCell> {
        &self.cell
    }

    pub fn id(&self) -> BlockId {
        self.cell.id()
    }

    /// Current offset of the block in the heap buffer
    pub fn start(&self) -> Offset {
        self.cell.start()
    }

    pub fn size(&self) -> Size {
        self.cell.size()
    }

    pub fn end(&self) -> Offset {
        self.start() + self.size()
    }

    pub fn is_freed(&self) -> bool {
        self.cell.is_freed()
    }

    /// Write `data` at `offset` bytes into the block
    pub fn write(&self, data: &[u8], offset: Offset) -> HeapResult<()> {
        let mut bytes = self.cell.storage.write();
        self.ensure_live()?;
        self.check_bounds(Access::Write, offset, data.len())?;

        let begin = self.cell.start() + offset;
        bytes[begin..begin + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Read `len` bytes starting at `offset`.
    ///
    /// `None` reads the remainder of the block. The returned bytes are a copy,
    /// unaffected by later writes or relocation.
    pub fn read(&self, len: Option<Size>, offset: Offset) -> HeapResult<Vec<u8>> {
        let bytes = self.cell.storage.read();
        self.ensure_live()?;

        let len = match len {
            Some(len) => len,
            None => self
                .size()
                .checked_sub(offset)
                .ok_or(HeapError::OutOfBounds {
                    operation: Access::Read,
                    end: offset,
                    size: self.size(),
                })?,
        };
        self.check_bounds(Access::Read, offset, len)?;

        let begin = self.cell.start() + offset;
        Ok(bytes[begin..begin + len].to_vec())
    }

    /// Read the whole block
    pub fn read_all(&self) -> HeapResult<Vec<u8>> {
        self.read(None, 0)
    }

    fn ensure_live(&self) -> HeapResult<()> {
        if self.cell.is_freed() {
            return Err(HeapError::UseAfterFree {
                block_id: self.id(),
            });
        }
        Ok(())
    }

    fn check_bounds(&self, operation: Access, offset: Offset, len: Size) -> HeapResult<()> {
        match offset.checked_add(len) {
            Some(end) if end <= self.size() => Ok(()),
            _ => Err(HeapError::OutOfBounds {
                operation,
                end: offset.saturating_add(len),
                size: self.size(),
            }),
        }
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("id", &self.id())
            .field("start", &self.start())
            .field("size", &self.size())
            .field("freed", &self.is_freed())
            .finish()
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl Eq for Block {}
