use crate::tables::ItemId;
use serde::{Deserialize, Serialize};

/// One rewarded item stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RewardItem {
    pub item_id: ItemId,
    pub quantity: u32,
}

impl RewardItem {
    pub fn new(item_id: ItemId, quantity: u32) -> Self {
        Self { item_id, quantity }
    }
}
