/*!
 * Memory Module
 * Simulated heap allocation
 */

pub mod block;
pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use block::Block;
pub use manager::HeapAllocator;
pub use traits::*;
pub use types::*;
