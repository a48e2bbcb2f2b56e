/*!
 * Allocation Tests
 * First-fit allocation, sizing and out-of-memory reporting
 */

use pretty_assertions::assert_eq;
use simheap::{Allocator, ConfigError, HeapAllocator, HeapConfig, HeapError, HeapInfo};

#[test]
fn test_heap_initialization() {
    let heap = HeapAllocator::new(1024);

    assert_eq!(heap.total_size(), 1024);
    assert_eq!(heap.allocated_size(), 0);
    assert_eq!(heap.free_size(), 1024);
    assert_eq!(heap.allocated_blocks(), 0);
}

#[test]
fn test_single_allocation() {
    let heap = HeapAllocator::new(1024);
    let block = heap.allocate(100).unwrap();

    assert_eq!(block.size(), 100);
    assert_eq!(block.start(), 0);
    assert_eq!(block.end(), 100);
    assert!(!block.is_freed());
    assert_eq!(heap.allocated_size(), 100);
    assert_eq!(heap.free_size(), 924);
}

#[test]
fn test_multiple_allocations() {
    let heap = HeapAllocator::new(1024);

    let b1 = heap.allocate(100).unwrap();
    let b2 = heap.allocate(200).unwrap();
    let b3 = heap.allocate(300).unwrap();

    assert_eq!(b1.size(), 100);
    assert_eq!(b2.size(), 200);
    assert_eq!(b3.size(), 300);
    assert_eq!((b1.start(), b2.start(), b3.start()), (0, 100, 300));
    assert_eq!(heap.allocated_size(), 600);
    assert_eq!(heap.free_size(), 424);
}

#[test]
fn test_zero_size_is_rejected() {
    let heap = HeapAllocator::new(1024);

    assert_eq!(
        heap.allocate(0).unwrap_err(),
        HeapError::InvalidSize { size: 0 }
    );
    assert_eq!(heap.allocated_size(), 0);
    assert_eq!(heap.free_size(), 1024);
}

#[test]
fn test_allocation_larger_than_heap() {
    let heap = HeapAllocator::new(1024);

    let err = heap.allocate(2000).unwrap_err();
    assert_eq!(
        err,
        HeapError::OutOfMemory {
            requested: 2000,
            available: 1024
        }
    );
}

#[test]
fn test_exact_fill_then_oom() {
    let heap = HeapAllocator::new(256);
    let _a = heap.allocate(256).unwrap();

    assert_eq!(heap.free_size(), 0);
    assert!(heap.free_extents().is_empty());
    assert_eq!(
        heap.allocate(1).unwrap_err(),
        HeapError::OutOfMemory {
            requested: 1,
            available: 0
        }
    );
}

#[test]
fn test_oom_reports_total_free_not_largest_extent() {
    let heap = HeapAllocator::new(600);
    let blocks: Vec<_> = (0..5).map(|_| heap.allocate(100).unwrap()).collect();

    heap.release(&blocks[1]).unwrap();
    heap.release(&blocks[3]).unwrap();

    match heap.allocate(400) {
        Err(HeapError::OutOfMemory {
            requested,
            available,
        }) => {
            assert_eq!(requested, 400);
            assert_eq!(available, 300);
        }
        other => panic!("Expected OutOfMemory error, got {:?}", other),
    }

    // The failed request still compacted the heap, nothing else changed
    assert_eq!(heap.allocated_size(), 300);
    assert_eq!(heap.free_size(), 300);
    assert_eq!(heap.free_extents().len(), 1);
}

#[test]
fn test_zero_capacity_heap() {
    let heap = HeapAllocator::new(0);
    assert!(heap.free_extents().is_empty());
    assert!(matches!(
        heap.allocate(1),
        Err(HeapError::OutOfMemory {
            requested: 1,
            available: 0
        })
    ));
}

#[test]
fn test_with_config_validates() {
    let bad = HeapConfig::with_capacity(64).with_thresholds(0.9, 0.5);
    assert!(HeapAllocator::with_config(bad).is_err());

    let heap = HeapAllocator::with_config(HeapConfig::with_capacity(64)).unwrap();
    assert_eq!(heap.config().total_size, 64);
}

#[test]
fn test_with_config_rejects_zero_capacity() {
    let result = HeapAllocator::with_config(HeapConfig::with_capacity(0));
    assert!(matches!(result, Err(ConfigError::ZeroCapacity)));
}

#[test]
fn test_trait_object_style_usage() {
    fn churn<H: Allocator + HeapInfo>(heap: &H) -> usize {
        let block = heap.allocate(32).unwrap();
        let used = heap.allocated_size();
        heap.release(&block).unwrap();
        used
    }

    let heap = HeapAllocator::new(128);
    assert_eq!(churn(&heap), 32);
    assert_eq!(HeapInfo::free_size(&heap), 128);
}

#[test]
fn test_clones_share_the_heap() {
    let heap = HeapAllocator::new(128);
    let handle = heap.clone();

    let block = handle.allocate(64).unwrap();
    assert_eq!(heap.allocated_size(), 64);
    assert!(heap.is_allocated(&block));

    heap.release(&block).unwrap();
    assert_eq!(handle.free_size(), 128);
}
