use crate::types::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A catalog item as served by the item table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub item_type: ItemType,
    /// Base armor class, only counted for armor
    #[serde(default)]
    pub ac: i32,
    #[serde(default)]
    pub mods: StatMods,
    /// Ability ids granted while equipped
    #[serde(default)]
    pub abilities: Vec<RecordId>,
    /// Weapon damage dice such as "2d6"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmg: Option<String>,
}

impl Item {
    pub fn is_armor(&self) -> bool {
        self.item_type == ItemType::Armor
    }

    /// Armor class this item contributes while worn
    pub fn armor_class(&self) -> i32 {
        let base = if self.is_armor() { self.ac } else { 0 };
        base.saturating_add(self.mods.ac)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.item_type)?;
        if self.is_armor() {
            write!(f, " AC {}", self.ac)?;
        }
        if let Some(ref dmg) = self.dmg {
            write!(f, " {}", dmg)?;
        }
        Ok(())
    }
}

/// A job (character class) and its base attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "str", default)]
    pub strength: i32,
    #[serde(rename = "dex", default)]
    pub dexterity: i32,
    #[serde(rename = "int", default)]
    pub intelligence: i32,
    #[serde(default)]
    pub hit: i32,
    #[serde(rename = "hp", default)]
    pub hit_points: i32,
    /// Armor class baseline; not part of the derived total
    #[serde(default)]
    pub ac: i32,
}

/// An ability granted by equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub element: String,
}

impl Ability {
    pub fn group(&self) -> AbilityGroup {
        AbilityGroup::from_element(&self.element)
    }
}

/// Item reference stored in an equipment slot
pub type ItemRef = RecordRef;

/// Character record as owned by the game server.
///
/// Fields the panel does not interpret (action points, gold, ...) are kept
/// in `extra` so they survive expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCharacter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    pub current_job: RecordRef,
    #[serde(default)]
    pub hp: i32,
    #[serde(default)]
    pub equipment: BTreeMap<String, ItemRef>,
    #[serde(default)]
    pub inventory: Vec<RecordId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
