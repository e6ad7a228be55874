use super::types::RewardItem;
use crate::rng::BattleRng;
use crate::tables::{DropEntry, DropTableRow, ItemId};
use std::collections::BTreeMap;

/// Draws one batch from a drop table.
///
/// One draw picks the item count in `min_count..=max_count`, then every item
/// takes one draw over the cumulative weights of the entries in item id
/// order. The batch comes back merged and sorted by item id.
pub fn draw_rewards(table: &DropTableRow, rng: &mut BattleRng) -> Vec<RewardItem> {
    let entries = table.sorted_entries();
    let total_weight = table.total_weight();
    let count = rng.next_int(i64::from(table.min_count), i64::from(table.max_count));

    let mut picked = Vec::new();
    for _ in 0..count {
        if let Some(entry) = pick_entry(&entries, total_weight, rng) {
            picked.push(RewardItem::new(entry.item_id, entry.quantity));
        }
    }
    merge_rewards(picked)
}

/// Weighted pick over `entries` (already in canonical order).
///
/// Always consumes exactly one draw when `total_weight > 0`; none otherwise.
pub fn pick_entry(entries: &[DropEntry], total_weight: u64, rng: &mut BattleRng) -> Option<DropEntry> {
    if total_weight == 0 {
        return None;
    }
    let max = i64::try_from(total_weight - 1).unwrap_or(i64::MAX);
    let roll = rng.next_int(0, max);

    let mut cumulative: i64 = 0;
    for entry in entries {
        cumulative = cumulative.saturating_add(i64::from(entry.weight));
        if roll < cumulative {
            return Some(*entry);
        }
    }
    None
}

/// Sums quantities per item id; the result is ascending by item id.
pub fn merge_rewards<I>(items: I) -> Vec<RewardItem>
where
    I: IntoIterator<Item = RewardItem>,
{
    let mut merged: BTreeMap<ItemId, u32> = BTreeMap::new();
    for item in items {
        let quantity = merged.entry(item.item_id).or_insert(0);
        *quantity = quantity.saturating_add(item.quantity);
    }
    merged
        .into_iter()
        .map(|(item_id, quantity)| RewardItem::new(item_id, quantity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(min_count: u32, max_count: u32) -> DropTableRow {
        DropTableRow {
            id: 1,
            min_count,
            max_count,
            entries: vec![
                DropEntry {
                    item_id: 303,
                    weight: 50,
                    quantity: 1,
                },
                DropEntry {
                    item_id: 101,
                    weight: 30,
                    quantity: 2,
                },
                DropEntry {
                    item_id: 202,
                    weight: 0,
                    quantity: 1,
                },
                DropEntry {
                    item_id: 404,
                    weight: 20,
                    quantity: 1,
                },
            ],
        }
    }

    #[test]
    fn test_rewards_sorted_and_within_count() {
        for seed in 0..50 {
            let mut rng = BattleRng::from_seed(seed);
            let rewards = draw_rewards(&table(2, 5), &mut rng);
            let ids: Vec<ItemId> = rewards.iter().map(|r| r.item_id).collect();
            let mut sorted = ids.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(ids, sorted);
            assert!(!ids.contains(&202), "zero-weight entry was drawn");
        }
    }

    #[test]
    fn test_draw_count_is_one_plus_items() {
        let mut rng = BattleRng::from_seed(7);
        draw_rewards(&table(3, 3), &mut rng);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn test_same_seed_same_rewards() {
        let a = draw_rewards(&table(1, 10), &mut BattleRng::from_seed(99));
        let b = draw_rewards(&table(1, 10), &mut BattleRng::from_seed(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_quantities_merge_per_item() {
        let merged = merge_rewards(vec![
            RewardItem::new(5, 1),
            RewardItem::new(2, 3),
            RewardItem::new(5, 4),
        ]);
        assert_eq!(merged, vec![RewardItem::new(2, 3), RewardItem::new(5, 5)]);
    }

    #[test]
    fn test_zero_count_draws_no_items() {
        let mut rng = BattleRng::from_seed(1);
        assert!(draw_rewards(&table(0, 0), &mut rng).is_empty());
        assert_eq!(rng.draws(), 1);
    }
}
