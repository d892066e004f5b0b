//! StatAccumulator - Collects job base stats and equipment deltas

use item_core::{Item, Job, StatMods};
use serde::{Deserialize, Serialize};

/// Floor applied to derived max hit points
pub const MIN_MAX_HIT_POINTS: i32 = 1;

/// Running totals while walking a character's equipment
///
/// Seeded from the job's base attributes; armor class starts at zero
/// regardless of the job's baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatAccumulator {
    pub armor_class: i32,
    pub hit_points: i32,
    pub strength: i32,
    pub dexterity: i32,
    pub intelligence: i32,
    pub hit: i32,
}

impl StatAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        StatAccumulator::default()
    }

    /// Seed from a job's base attributes
    pub fn from_job(job: &Job) -> Self {
        StatAccumulator {
            armor_class: 0,
            hit_points: job.hit_points,
            strength: job.strength,
            dexterity: job.dexterity,
            intelligence: job.intelligence,
            hit: job.hit,
        }
    }

    /// Apply a worn item: base AC for armor, then its mods
    pub fn apply_item(&mut self, item: &Item) {
        if item.is_armor() {
            self.armor_class = self.armor_class.saturating_add(item.ac);
        }
        self.apply_mods(&item.mods);
    }

    /// Add an item's stat deltas, saturating at the `i32` bounds
    pub fn apply_mods(&mut self, mods: &StatMods) {
        self.armor_class = self.armor_class.saturating_add(mods.ac);
        self.hit_points = self.hit_points.saturating_add(mods.hp);
        self.strength = self.strength.saturating_add(mods.strength);
        self.dexterity = self.dexterity.saturating_add(mods.dexterity);
        self.intelligence = self.intelligence.saturating_add(mods.intelligence);
        self.hit = self.hit.saturating_add(mods.hit);
    }

    /// Max hit points after flooring
    pub fn max_hit_points(&self) -> i32 {
        self.hit_points.max(MIN_MAX_HIT_POINTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use item_core::{ItemType, RecordId};

    fn job() -> Job {
        Job {
            id: RecordId::from("warrior"),
            name: "Warrior".to_string(),
            strength: 3,
            dexterity: 2,
            intelligence: 1,
            hit: 4,
            hit_points: 30,
            ac: 12,
        }
    }

    fn item(item_type: ItemType, ac: i32, mods: StatMods) -> Item {
        Item {
            id: RecordId::from("thing"),
            name: "Thing".to_string(),
            description: String::new(),
            item_type,
            ac,
            mods,
            abilities: Vec::new(),
            dmg: None,
        }
    }

    #[test]
    fn test_seed_ignores_job_ac() {
        let acc = StatAccumulator::from_job(&job());
        assert_eq!(acc.armor_class, 0);
        assert_eq!(acc.hit_points, 30);
        assert_eq!(acc.strength, 3);
    }

    #[test]
    fn test_armor_base_counts_only_for_armor() {
        let mut acc = StatAccumulator::new();
        acc.apply_item(&item(ItemType::Armor, 5, StatMods::default()));
        acc.apply_item(&item(ItemType::Weapon, 9, StatMods::default()));
        assert_eq!(acc.armor_class, 5);
    }

    #[test]
    fn test_mods_apply_for_every_type() {
        let mods = StatMods {
            ac: 1,
            hp: -5,
            strength: 2,
            dexterity: -1,
            intelligence: 3,
            hit: 1,
        };
        let mut acc = StatAccumulator::from_job(&job());
        acc.apply_item(&item(ItemType::Consumable, 0, mods));
        assert_eq!(acc.armor_class, 1);
        assert_eq!(acc.hit_points, 25);
        assert_eq!(acc.strength, 5);
        assert_eq!(acc.dexterity, 1);
        assert_eq!(acc.intelligence, 4);
        assert_eq!(acc.hit, 5);
    }

    #[test]
    fn test_max_hit_points_floor() {
        let mut acc = StatAccumulator::from_job(&job());
        acc.apply_mods(&StatMods {
            hp: -30,
            ..StatMods::default()
        });
        assert_eq!(acc.hit_points, 0);
        assert_eq!(acc.max_hit_points(), 1);
    }

    #[test]
    fn test_sums_saturate() {
        let mut acc = StatAccumulator::new();
        let huge = StatMods {
            ac: i32::MAX,
            hp: i32::MIN,
            ..StatMods::default()
        };
        acc.apply_item(&item(ItemType::Armor, i32::MAX, huge));
        acc.apply_mods(&huge);
        assert_eq!(acc.armor_class, i32::MAX);
        assert_eq!(acc.hit_points, i32::MIN);
        assert_eq!(acc.max_hit_points(), MIN_MAX_HIT_POINTS);
    }
}
