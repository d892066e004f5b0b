//! The derived character view

use crate::damage::{damage_range, DamageRange, DiceError};
use crate::stat_block::recompute_armor_class;
use item_core::{Ability, AbilityGroup, Item, ItemType, Job, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Equipment slot holding the character's weapon
pub const WEAPON_SLOT: &str = "hand";

/// A character after job stats and equipment have been applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveCharacter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub current_job: Job,
    /// Current hit points, never above `max_hp`
    pub hp: i32,
    pub max_hp: i32,
    #[serde(rename = "str")]
    pub strength: i32,
    #[serde(rename = "dex")]
    pub dexterity: i32,
    #[serde(rename = "int")]
    pub intelligence: i32,
    pub hit: i32,
    #[serde(rename = "totalAC")]
    pub total_ac: i32,
    pub action_cooldown: i32,
    pub equipment: BTreeMap<String, Item>,
    pub inventory: Vec<Item>,
    /// Granted abilities, one per id, in first-equipped-slot order
    pub abilities: Vec<Ability>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EffectiveCharacter {
    /// Armor class from the resolved equipment alone
    pub fn recompute_armor_class(&self) -> i32 {
        recompute_armor_class(&self.equipment)
    }

    pub fn weapon(&self) -> Option<&Item> {
        self.equipment.get(WEAPON_SLOT)
    }

    pub fn damage_range(&self) -> Result<Option<DamageRange>, DiceError> {
        damage_range(self)
    }

    pub fn abilities_in(&self, group: AbilityGroup) -> impl Iterator<Item = &Ability> {
        self.abilities.iter().filter(move |a| a.group() == group)
    }

    pub fn inventory_of(&self, item_type: ItemType) -> impl Iterator<Item = &Item> {
        self.inventory.iter().filter(move |i| i.item_type == item_type)
    }
}
