//! Weapon damage range from dice notation

mod dice;

pub use dice::{DiceError, DiceExpr};

use crate::types::EffectiveCharacter;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Low/high damage of a basic attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRange {
    pub low: i32,
    pub high: i32,
}

impl fmt::Display for DamageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Damage range of the weapon in the hand slot, offset by strength
///
/// Returns `None` when nothing is wielded or the weapon has no dice.
pub fn damage_range(character: &EffectiveCharacter) -> Result<Option<DamageRange>, DiceError> {
    let Some(dmg) = character.weapon().and_then(|w| w.dmg.as_deref()) else {
        return Ok(None);
    };
    let dice: DiceExpr = dmg.parse()?;
    Ok(Some(DamageRange {
        low: dice.min_roll().saturating_add(character.strength),
        high: dice.max_roll().saturating_add(character.strength),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat_block::expand;
    use item_core::{Item, ItemType, Job, RawCharacter, RecordId, RecordRef, StatMods};
    use serde_json::Map;
    use tables_core::{Catalog, LookupTable};

    fn setup(dmg: Option<&str>, wield: bool) -> EffectiveCharacter {
        let job = Job {
            id: RecordId::from("warrior"),
            name: "Warrior".to_string(),
            strength: 3,
            dexterity: 0,
            intelligence: 0,
            hit: 0,
            hit_points: 10,
            ac: 0,
        };
        let sword = Item {
            id: RecordId::from("sword"),
            name: "Sword".to_string(),
            description: String::new(),
            item_type: ItemType::Weapon,
            ac: 0,
            mods: StatMods {
                strength: 1,
                ..StatMods::default()
            },
            abilities: Vec::new(),
            dmg: dmg.map(str::to_string),
        };
        let catalog = Catalog::new(
            LookupTable::from_records(vec![sword]),
            LookupTable::from_records(vec![job]),
            LookupTable::default(),
        );
        let mut raw = RawCharacter {
            id: None,
            name: "deus".to_string(),
            current_job: RecordRef::from("warrior"),
            hp: 10,
            equipment: Default::default(),
            inventory: Vec::new(),
            extra: Map::new(),
        };
        if wield {
            raw.equipment.insert("hand".to_string(), RecordRef::from("sword"));
        }
        expand(&raw, &catalog).unwrap()
    }

    #[test]
    fn test_range_includes_strength() {
        let character = setup(Some("2d6"), true);
        let range = character.damage_range().unwrap().unwrap();
        assert_eq!(range, DamageRange { low: 6, high: 16 });
    }

    #[test]
    fn test_no_weapon_no_range() {
        assert_eq!(setup(Some("2d6"), false).damage_range().unwrap(), None);
        assert_eq!(setup(None, true).damage_range().unwrap(), None);
    }

    #[test]
    fn test_bad_dice_is_an_error() {
        assert!(setup(Some("sharp"), true).damage_range().is_err());
    }

    #[test]
    fn test_oversized_dice_is_an_error() {
        assert_eq!(
            setup(Some("100000d100000"), true).damage_range(),
            Err(DiceError::TooLarge("100000d100000".to_string()))
        );
    }

    #[test]
    fn test_strength_offset_saturates() {
        let mut character = setup(Some("46340d46340"), true);
        character.strength = i32::MAX;
        let range = character.damage_range().unwrap().unwrap();
        assert_eq!(range.high, i32::MAX);

        character.strength = i32::MIN;
        let range = character.damage_range().unwrap().unwrap();
        assert_eq!(range.low, i32::MIN + 46340);
    }
}
