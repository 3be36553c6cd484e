//! Data models for launcher search.
//!
//! `SearchableItem` is the long-lived catalog entity owned by a provider.
//! `ScoredItem` is the fresh record each ranking pass produces for it, so
//! concurrent or abandoned passes never write into shared catalog state.

pub mod history;
pub mod item;
pub mod scored;
pub mod tags;

pub use history::ValuedHistoryRecord;
pub use item::{compare_by_name, push_escaped, ItemKind, SearchableItem};
pub use scored::ScoredItem;
pub use tags::{split_tags, TagFilter};
