use super::sheet::SheetRow;
use super::{DropTableId, ItemId};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropEntry {
    pub item_id: ItemId,
    pub weight: u32,
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

/// Weighted item table. `min_count..=max_count` items are drawn per use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTableRow {
    pub id: DropTableId,
    pub min_count: u32,
    pub max_count: u32,
    pub entries: Vec<DropEntry>,
}

impl DropTableRow {
    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.weight)).sum()
    }

    /// Entries in canonical draw order (ascending item id, then file order).
    pub fn sorted_entries(&self) -> Vec<DropEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|e| e.item_id);
        entries
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_count > self.max_count {
            return Err(ConfigError::InvalidDropRange {
                id: self.id,
                min: self.min_count,
                max: self.max_count,
            });
        }
        if self.total_weight() == 0 {
            return Err(ConfigError::EmptyDropTable { id: self.id });
        }
        Ok(())
    }
}

impl SheetRow for DropTableRow {
    type Key = DropTableId;
    const NAME: &'static str = "DropTableSheet";

    fn key(&self) -> DropTableId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_bad_tables() {
        let mut table = DropTableRow {
            id: 1,
            min_count: 2,
            max_count: 1,
            entries: vec![DropEntry {
                item_id: 10,
                weight: 1,
                quantity: 1,
            }],
        };
        assert!(matches!(
            table.validate(),
            Err(ConfigError::InvalidDropRange { .. })
        ));
        table.max_count = 3;
        assert!(table.validate().is_ok());
        table.entries[0].weight = 0;
        assert_eq!(table.validate(), Err(ConfigError::EmptyDropTable { id: 1 }));
    }

    #[test]
    fn test_sorted_entries_stable() {
        let table = DropTableRow {
            id: 1,
            min_count: 1,
            max_count: 1,
            entries: vec![
                DropEntry {
                    item_id: 30,
                    weight: 1,
                    quantity: 1,
                },
                DropEntry {
                    item_id: 10,
                    weight: 2,
                    quantity: 1,
                },
                DropEntry {
                    item_id: 20,
                    weight: 3,
                    quantity: 1,
                },
            ],
        };
        let ids: Vec<u32> = table.sorted_entries().iter().map(|e| e.item_id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
        assert_eq!(table.total_weight(), 6);
    }
}
