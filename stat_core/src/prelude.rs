//! Prelude module for convenient imports
//!
//! ```rust
//! use stat_core::prelude::*;
//! ```

// Expansion
pub use crate::stat_block::{action_cooldown, expand, recompute_armor_class};
pub use crate::types::EffectiveCharacter;

// Damage
pub use crate::damage::DamageRange;

// Re-exports from item_core and tables_core
pub use item_core::{Ability, AbilityGroup, Item, ItemType, Job, RawCharacter, RecordId};
pub use tables_core::{Catalog, LookupError, LookupTable};
