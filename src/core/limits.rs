/*!
 * Heap Limits and Constants
 *
 * Centralized location for heap-wide defaults and thresholds.
 */

// =============================================================================
// CAPACITY
// =============================================================================

/// Default simulated heap size (1MB)
pub const DEFAULT_HEAP_SIZE: usize = 1024 * 1024;

// =============================================================================
// MEMORY PRESSURE
// =============================================================================

/// Usage ratio at which pressure is reported as medium
pub const MEDIUM_PRESSURE_THRESHOLD: f64 = 0.60;

/// Usage ratio at which allocation starts warning (80%)
pub const DEFAULT_WARNING_THRESHOLD: f64 = 0.80;

/// Usage ratio considered critical (95%)
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 0.95;
