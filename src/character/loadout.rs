//! Player-side battle inputs, already validated by the caller.

use super::stats::{ElementalType, StatModifier};
use crate::tables::{ItemId, SkillId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Belt,
    Necklace,
    Ring1,
    Ring2,
}

impl EquipmentSlot {
    /// Slot order used for modifier and skill collection.
    pub const ALL: [EquipmentSlot; 6] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Armor,
        EquipmentSlot::Belt,
        EquipmentSlot::Necklace,
        EquipmentSlot::Ring1,
        EquipmentSlot::Ring2,
    ];
}

/// A skill granted by gear or a rune, with its rolled trigger chance and power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantedSkill {
    pub skill_id: SkillId,
    pub chance: u32,
    pub power: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub item_id: ItemId,
    #[serde(default)]
    pub element: ElementalType,
    pub main_stat: StatModifier,
    /// Rolled option modifiers
    #[serde(default)]
    pub options: Vec<StatModifier>,
    #[serde(default)]
    pub skills: Vec<GrantedSkill>,
}

/// Equipped gear, one optional item per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    pub weapon: Option<EquippedItem>,
    pub armor: Option<EquippedItem>,
    pub belt: Option<EquippedItem>,
    pub necklace: Option<EquippedItem>,
    pub ring1: Option<EquippedItem>,
    pub ring2: Option<EquippedItem>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&EquippedItem> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Armor => self.armor.as_ref(),
            EquipmentSlot::Belt => self.belt.as_ref(),
            EquipmentSlot::Necklace => self.necklace.as_ref(),
            EquipmentSlot::Ring1 => self.ring1.as_ref(),
            EquipmentSlot::Ring2 => self.ring2.as_ref(),
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: Option<EquippedItem>) {
        match slot {
            EquipmentSlot::Weapon => self.weapon = item,
            EquipmentSlot::Armor => self.armor = item,
            EquipmentSlot::Belt => self.belt = item,
            EquipmentSlot::Necklace => self.necklace = item,
            EquipmentSlot::Ring1 => self.ring1 = item,
            EquipmentSlot::Ring2 => self.ring2 = item,
        }
    }

    /// Equipped items in slot order.
    pub fn iter_equipped(&self) -> impl Iterator<Item = &EquippedItem> {
        EquipmentSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot))
    }

    /// Weapon element, or `Normal` without a weapon.
    pub fn element(&self) -> ElementalType {
        self.weapon
            .as_ref()
            .map(|w| w.element)
            .unwrap_or_default()
    }
}

/// Costumes only carry passive stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Costume {
    pub item_id: ItemId,
    pub modifiers: Vec<StatModifier>,
}

/// Consumed for a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumable {
    pub item_id: ItemId,
    pub modifiers: Vec<StatModifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuneSlot {
    pub rune_id: u32,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLoadout {
    pub actor_id: u32,
    pub character_id: u32,
    pub level: u32,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub costumes: Vec<Costume>,
    #[serde(default)]
    pub consumables: Vec<Consumable>,
    #[serde(default)]
    pub runes: Vec<RuneSlot>,
    /// Collection bonuses
    #[serde(default)]
    pub collection: Vec<StatModifier>,
    #[serde(default)]
    pub staking_level: Option<u32>,
}

impl PlayerLoadout {
    pub fn new(actor_id: u32, character_id: u32, level: u32) -> Self {
        Self {
            actor_id,
            character_id,
            level,
            equipment: Equipment::new(),
            costumes: Vec::new(),
            consumables: Vec::new(),
            runes: Vec::new(),
            collection: Vec::new(),
            staking_level: None,
        }
    }

    /// Runes sorted by rune id; equal ids keep their input order.
    pub fn sorted_runes(&self) -> Vec<RuneSlot> {
        let mut runes = self.runes.clone();
        runes.sort_by_key(|r| r.rune_id);
        runes
    }

    /// Summed rune level, saturating at `u32::MAX`.
    pub fn total_rune_level(&self) -> u32 {
        self.runes.iter().map(|r| r.level).fold(0, u32::saturating_add)
    }
}
