use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier of a catalog or character record.
///
/// The catalog service hands out ids as JSON strings or JSON integers
/// depending on the table, so both are accepted and normalized to the
/// decimal string form. `7` and `"7"` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId(s)
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        RecordId(n.to_string())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct RecordIdVisitor;

impl<'de> Visitor<'de> for RecordIdVisitor {
    type Value = RecordId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer record id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> {
        Ok(RecordId(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RecordId, E> {
        Ok(RecordId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecordId, E> {
        Ok(RecordId(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecordId, E> {
        Ok(RecordId(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RecordIdVisitor)
    }
}

/// Reference to another record: either a bare id or an object carrying at
/// least an `id` field (any other fields are ignored).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordRef {
    Id(RecordId),
    Partial { id: RecordId },
}

impl RecordRef {
    pub fn id(&self) -> &RecordId {
        match self {
            RecordRef::Id(id) => id,
            RecordRef::Partial { id } => id,
        }
    }
}

impl From<&str> for RecordRef {
    fn from(s: &str) -> Self {
        RecordRef::Id(RecordId::from(s))
    }
}

/// Item type tag. Only `armor` contributes its base armor class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Weapon,
    Armor,
    Consumable,
    #[default]
    #[serde(other)]
    Other,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Weapon => write!(f, "weapon"),
            ItemType::Armor => write!(f, "armor"),
            ItemType::Consumable => write!(f, "consumable"),
            ItemType::Other => write!(f, "other"),
        }
    }
}

/// Stat deltas an item applies while equipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatMods {
    pub ac: i32,
    pub hp: i32,
    #[serde(rename = "str")]
    pub strength: i32,
    #[serde(rename = "dex")]
    pub dexterity: i32,
    #[serde(rename = "int")]
    pub intelligence: i32,
    pub hit: i32,
}

/// Display grouping of abilities by their element tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityGroup {
    Attack,
    Healing,
    Buff,
}

impl AbilityGroup {
    pub fn from_element(element: &str) -> Self {
        match element {
            "HEALING" => AbilityGroup::Healing,
            "BUFFING" => AbilityGroup::Buff,
            _ => AbilityGroup::Attack,
        }
    }
}

impl fmt::Display for AbilityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbilityGroup::Attack => write!(f, "Attack"),
            AbilityGroup::Healing => write!(f, "Healing"),
            AbilityGroup::Buff => write!(f, "Buff"),
        }
    }
}
