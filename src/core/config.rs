/*!
 * Heap Configuration
 *
 * Construction-time settings for a simulated heap
 */

use super::limits::{DEFAULT_CRITICAL_THRESHOLD, DEFAULT_HEAP_SIZE, DEFAULT_WARNING_THRESHOLD};
use super::types::Size;
use miette::Diagnostic;
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Diagnostic)]
pub enum ConfigError {
    #[error("Heap capacity must be non-zero")]
    #[diagnostic(code(config::zero_capacity))]
    ZeroCapacity,

    #[error("Invalid {name} threshold: {value} (expected a ratio in (0, 1])")]
    #[diagnostic(
        code(config::invalid_threshold),
        help("Thresholds are usage ratios, e.g. 0.80 for 80%.")
    )]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("Warning threshold {warning} must not exceed critical threshold {critical}")]
    #[diagnostic(code(config::threshold_order))]
    ThresholdOrder { warning: f64, critical: f64 },
}

/// Heap configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeapConfig {
    /// Capacity of the backing buffer in bytes
    pub total_size: Size,
    /// Compact and retry once when no free extent fits a request
    pub auto_compact: bool,
    /// Usage ratio at which allocations log a pressure warning
    pub warning_threshold: f64,
    /// Usage ratio reported as critical
    pub critical_threshold: f64,
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HEAP_SIZE)
    }
}

impl HeapConfig {
    pub const fn with_capacity(total_size: Size) -> Self {
        Self {
            total_size,
            auto_compact: true,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
        }
    }

    /// Configuration that never relocates blocks implicitly
    pub const fn manual_compaction(total_size: Size) -> Self {
        Self {
            auto_compact: false,
            ..Self::with_capacity(total_size)
        }
    }

    pub fn with_auto_compact(mut self, enabled: bool) -> Self {
        self.auto_compact = enabled;
        self
    }

    pub fn with_thresholds(mut self, warning: f64, critical: f64) -> Self {
        self.warning_threshold = warning;
        self.critical_threshold = critical;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_size == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        for (name, value) in [
            ("warning", self.warning_threshold),
            ("critical", self.critical_threshold),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }

        if self.warning_threshold > self.critical_threshold {
            return Err(ConfigError::ThresholdOrder {
                warning: self.warning_threshold,
                critical: self.critical_threshold,
            });
        }

        Ok(())
    }
}
