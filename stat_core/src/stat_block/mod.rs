//! Character expansion - raw record + catalog -> EffectiveCharacter

mod aggregator;

pub use aggregator::{StatAccumulator, MIN_MAX_HIT_POINTS};

use crate::types::EffectiveCharacter;
use item_core::{Ability, Item, RawCharacter};
use std::collections::BTreeMap;
use tables_core::{Catalog, LookupError};

/// Base cooldown before dexterity is applied
pub const BASE_ACTION_COOLDOWN: i32 = 6;
/// Dexterity stops reducing cooldown past this value
pub const MAX_COOLDOWN_DEXTERITY: i32 = 5;
/// Upper bound on cooldown for negative dexterity
pub const MAX_ACTION_COOLDOWN: i32 = 11;

/// Expand a raw character against the catalog (pure; the record is not touched)
///
/// 1. Seeds attributes from the current job, armor class from zero
/// 2. Walks equipment in slot-name order, applying each item and collecting
///    granted abilities (first slot wins, no duplicate ids)
/// 3. Resolves the inventory in order
/// 4. Floors max hit points at 1 and clamps current hit points to it
/// 5. Derives the action cooldown from dexterity
///
/// Any id missing from its table is returned as a `LookupError`.
pub fn expand(raw: &RawCharacter, catalog: &Catalog) -> Result<EffectiveCharacter, LookupError> {
    let job = catalog.jobs.resolve(raw.current_job.id())?;
    let mut acc = StatAccumulator::from_job(job);

    let mut equipment: BTreeMap<String, Item> = BTreeMap::new();
    let mut abilities: Vec<Ability> = Vec::new();

    for (slot, item_ref) in &raw.equipment {
        let item = catalog.items.resolve(item_ref.id())?;
        acc.apply_item(item);

        for ability_id in &item.abilities {
            if abilities.iter().any(|a| &a.id == ability_id) {
                continue;
            }
            abilities.push(catalog.abilities.resolve(ability_id)?.clone());
        }

        equipment.insert(slot.clone(), item.clone());
    }

    let inventory = raw
        .inventory
        .iter()
        .map(|id| catalog.items.resolve(id).cloned())
        .collect::<Result<Vec<_>, _>>()?;

    let max_hp = acc.max_hit_points();

    Ok(EffectiveCharacter {
        id: raw.id.clone(),
        name: raw.name.clone(),
        current_job: job.clone(),
        hp: raw.hp.min(max_hp),
        max_hp,
        strength: acc.strength,
        dexterity: acc.dexterity,
        intelligence: acc.intelligence,
        hit: acc.hit,
        total_ac: acc.armor_class,
        action_cooldown: action_cooldown(acc.dexterity),
        equipment,
        inventory,
        abilities,
        extra: raw.extra.clone(),
    })
}

/// Total armor class of already-resolved equipment
pub fn recompute_armor_class(equipment: &BTreeMap<String, Item>) -> i32 {
    equipment
        .values()
        .map(Item::armor_class)
        .fold(0, i32::saturating_add)
}

/// Seconds between actions: `min(11, 6 - min(5, dex))`
pub fn action_cooldown(dexterity: i32) -> i32 {
    MAX_ACTION_COOLDOWN
        .min(BASE_ACTION_COOLDOWN.saturating_sub(dexterity.min(MAX_COOLDOWN_DEXTERITY)))
}
