/*!
 * Core Module
 * Shared types, limits and configuration
 */

pub mod config;
pub mod limits;
pub mod types;

pub use config::{ConfigError, HeapConfig};
pub use types::{BlockId, Offset, Size};
