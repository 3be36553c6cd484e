//! Category providers and the per-item ranking routine.

#[allow(clippy::module_inception)]
mod provider;

pub use provider::{rank_item, Provider};
