/*!
 * Memory Types
 * Common types for heap management
 */

use crate::core::limits::MEDIUM_PRESSURE_THRESHOLD;
use crate::core::types::{BlockId, Offset, Size};
use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

/// Heap operation result
pub type HeapResult<T> = Result<T, HeapError>;

/// Kind of block access that failed a bounds check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Read => write!(f, "Read"),
            Access::Write => write!(f, "Write"),
        }
    }
}

/// Heap errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum HeapError {
    #[error("Invalid size: {size}")]
    #[diagnostic(
        code(heap::invalid_size),
        help("Allocation sizes must be at least one byte.")
    )]
    InvalidSize { size: Size },

    #[error("Block {block_id} is not managed by this heap")]
    #[diagnostic(
        code(heap::invalid_block),
        help("The block belongs to a different allocator.")
    )]
    InvalidBlock { block_id: BlockId },

    #[error("Block {block_id} cannot be accessed after being freed")]
    #[diagnostic(code(heap::use_after_free))]
    UseAfterFree { block_id: BlockId },

    #[error("Block {block_id} has already been freed")]
    #[diagnostic(code(heap::double_free))]
    DoubleFree { block_id: BlockId },

    #[error("{operation} is out of bounds: end {end} exceeds block size {size}")]
    #[diagnostic(code(heap::out_of_bounds))]
    OutOfBounds {
        operation: Access,
        end: Offset,
        size: Size,
    },

    #[error("Out of memory: requested {requested} bytes, available {available} bytes")]
    #[diagnostic(
        code(heap::out_of_memory),
        help("Available counts every free byte; the free space may not be contiguous.")
    )]
    OutOfMemory { requested: Size, available: Size },
}

impl HeapError {
    /// Whether the error concerns a specific block rather than the heap as a whole
    pub fn is_block_error(&self) -> bool {
        matches!(
            self,
            HeapError::InvalidBlock { .. }
                | HeapError::UseAfterFree { .. }
                | HeapError::DoubleFree { .. }
                | HeapError::OutOfBounds { .. }
        )
    }
}

/// Reclaimable region of the heap buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeExtent {
    pub start: Offset,
    pub size: Size,
}

impl FreeExtent {
    pub const fn new(start: Offset, size: Size) -> Self {
        Self { start, size }
    }

    #[inline]
    pub const fn end(&self) -> Offset {
        self.start + self.size
    }
}

/// Heap statistics
#[derive(Debug, Clone, PartialEq)]
pub struct HeapStats {
    pub total_size: Size,
    pub allocated_size: Size,
    pub free_size: Size,
    pub usage_percentage: f64,
    pub allocated_blocks: usize,
    pub free_extents: usize,
    pub largest_free_extent: Size,
    /// Share of free bytes outside the largest extent (0.0 = contiguous)
    pub fragmentation: f64,
    pub warning_threshold: f64,
    pub critical_threshold: f64,
}

impl HeapStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        let ratio = self.usage_percentage / 100.0;
        if ratio >= self.critical_threshold {
            MemoryPressure::Critical
        } else if ratio >= self.warning_threshold {
            MemoryPressure::High
        } else if ratio >= MEDIUM_PRESSURE_THRESHOLD {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
