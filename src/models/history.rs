//! Selection history records.

use crate::domain::ItemId;
use serde::Serialize;

/// An item previously selected for a query, with how often it was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValuedHistoryRecord {
    /// The selected item
    pub item_id: ItemId,

    /// Number of times it was selected for the query
    pub usage_count: u32,
}

impl ValuedHistoryRecord {
    /// Create a new record.
    pub fn new(item_id: ItemId, usage_count: u32) -> Self {
        Self {
            item_id,
            usage_count,
        }
    }
}
