/*!
 * Monitoring Module
 * Logging setup for the heap
 */

pub mod tracer;

pub use tracer::init_tracing;
