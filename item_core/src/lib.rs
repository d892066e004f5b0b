//! item_core - Record types shared by the battler panel crates
//!
//! Items, jobs and abilities as served by the catalog, plus the raw
//! character record owned by the game server.

pub mod item;
pub mod types;

pub use item::{Ability, Item, ItemRef, Job, RawCharacter};
pub use types::{AbilityGroup, ItemType, RecordId, RecordRef, StatMods};
