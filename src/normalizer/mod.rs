//! Text normalization shared by the query side and the catalog side.
//!
//! Both sides must go through the same functions here; any divergence in
//! policy breaks every downstream comparison.

pub mod string_normalizer;

pub use string_normalizer::{
    map_position, normalize, normalize_phone, normalize_query, normalize_with_map, phone_query,
    try_normalize, NormalizedText,
};
