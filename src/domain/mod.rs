//! Domain value objects and types.
//!
//! Type-safe wrappers for launcher concepts. Value objects validate at
//! construction time so an invalid id can never reach a provider catalog.

pub mod errors;
pub mod item_id;

pub use errors::ValidationError;
pub use item_id::ItemId;
