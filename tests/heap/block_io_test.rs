/*!
 * Block I/O Tests
 * Bounded reads and writes through block handles
 */

use pretty_assertions::assert_eq;
use simheap::{Access, HeapAllocator, HeapError};

#[test]
fn test_partial_read() {
    let heap = HeapAllocator::new(1024);
    let b1 = heap.allocate(100).unwrap();
    b1.write(b"This is a test.", 0).unwrap();

    assert_eq!(b1.read(Some(2), 5).unwrap(), b"is");
    assert_eq!(b1.read(Some(4), 10).unwrap(), b"test");
}

#[test]
fn test_write_at_offset_round_trip() {
    let heap = HeapAllocator::new(64);
    let block = heap.allocate(16).unwrap();

    block.write(b"tail", 12).unwrap();
    assert_eq!(block.read(Some(4), 12).unwrap(), b"tail");
    assert_eq!(block.read(Some(12), 0).unwrap(), vec![0u8; 12]);
}

#[test]
fn test_repeated_reads_are_identical() {
    let heap = HeapAllocator::new(64);
    let block = heap.allocate(8).unwrap();
    block.write(b"stable!!", 0).unwrap();

    let first = block.read_all().unwrap();
    let second = block.read_all().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_write_does_not_touch_neighbours() {
    let heap = HeapAllocator::new(64);
    let left = heap.allocate(4).unwrap();
    let middle = heap.allocate(4).unwrap();
    let right = heap.allocate(4).unwrap();

    middle.write(&[0xFF; 4], 0).unwrap();

    assert_eq!(left.read_all().unwrap(), vec![0u8; 4]);
    assert_eq!(right.read_all().unwrap(), vec![0u8; 4]);
}

#[test]
fn test_write_out_of_bounds() {
    let heap = HeapAllocator::new(64);
    let block = heap.allocate(8).unwrap();

    let err = block.write(b"overflow", 4).unwrap_err();
    assert_eq!(
        err,
        HeapError::OutOfBounds {
            operation: Access::Write,
            end: 12,
            size: 8
        }
    );

    // A rejected write leaves the block untouched
    assert_eq!(block.read_all().unwrap(), vec![0u8; 8]);
}

#[test]
fn test_read_out_of_bounds() {
    let heap = HeapAllocator::new(64);
    let block = heap.allocate(8).unwrap();

    assert_eq!(
        block.read(Some(6), 4),
        Err(HeapError::OutOfBounds {
            operation: Access::Read,
            end: 10,
            size: 8
        })
    );
}

#[test]
fn test_exact_fit_io_is_allowed() {
    let heap = HeapAllocator::new(64);
    let block = heap.allocate(8).unwrap();

    block.write(b"12345678", 0).unwrap();
    block.write(b"", 8).unwrap();
    assert_eq!(block.read(Some(0), 8).unwrap(), Vec::<u8>::new());
    assert_eq!(block.read(None, 0).unwrap(), b"12345678");
}

#[test]
fn test_use_after_free() {
    let heap = HeapAllocator::new(1024);
    let b1 = heap.allocate(100).unwrap();
    heap.release(&b1).unwrap();

    assert_eq!(
        b1.write(b"data", 0),
        Err(HeapError::UseAfterFree { block_id: b1.id() })
    );
    assert_eq!(
        b1.read_all(),
        Err(HeapError::UseAfterFree { block_id: b1.id() })
    );
}

#[test]
fn test_use_after_free_wins_over_bounds() {
    let heap = HeapAllocator::new(64);
    let block = heap.allocate(8).unwrap();
    heap.release(&block).unwrap();

    assert!(matches!(
        block.write(&[0; 100], 50),
        Err(HeapError::UseAfterFree { .. })
    ));
}

#[test]
fn test_stale_handle_cannot_touch_reused_range() {
    let heap = HeapAllocator::new(64);
    let old = heap.allocate(8).unwrap();
    heap.release(&old).unwrap();

    let new = heap.allocate(8).unwrap();
    new.write(b"newdata!", 0).unwrap();

    assert!(old.write(b"clobber!", 0).is_err());
    assert_eq!(new.read_all().unwrap(), b"newdata!");
}
