//! stat_core - Effective stats for battler characters
//!
//! This library provides:
//! - expand: raw character record + catalog tables -> EffectiveCharacter
//! - recompute_armor_class: armor class from already-resolved equipment
//! - StatAccumulator: job base stats plus equipment deltas
//! - damage_range: weapon dice offset by strength
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use stat_core::prelude::*;
//! use tables_core::Catalog;
//!
//! let catalog = Catalog::load(Path::new("catalog/")).unwrap();
//! let raw: RawCharacter = serde_json::from_str(&body).unwrap();
//! let character = expand(&raw, &catalog)?;
//! println!("AC {} / HP {}/{}", character.total_ac, character.hp, character.max_hp);
//! ```

pub mod damage;
pub mod prelude;
pub mod stat_block;
pub mod types;

pub use damage::{damage_range, DamageRange, DiceError, DiceExpr};
pub use stat_block::{action_cooldown, expand, recompute_armor_class, StatAccumulator};
pub use types::{EffectiveCharacter, WEAPON_SLOT};

pub use item_core::{Ability, AbilityGroup, Item, ItemType, Job, RawCharacter, RecordId};
pub use tables_core::{Catalog, LookupError, LookupTable};
