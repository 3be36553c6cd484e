//! Observability for search passes.
//!
//! Counters complement the structured `tracing` events emitted throughout
//! the crate.

pub mod metrics;

pub use metrics::{SearchMetrics, Timer};
