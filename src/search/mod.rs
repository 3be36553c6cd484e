//! Query execution across providers.
//!
//! The aggregator fans a query out to every provider, then boosts, filters,
//! orders and truncates the combined results.

pub mod aggregator;

pub use aggregator::{merge, QueryOutcome, QuerySnapshot, ResultAggregator, HISTORY_BOOST};
