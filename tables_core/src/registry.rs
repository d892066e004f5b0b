use crate::table::{Keyed, LookupTable};
use crate::ConfigError;
use item_core::{Ability, Item, Job};
use serde::de::DeserializeOwned;
use std::path::Path;

pub const ITEMS_FILE: &str = "items.json";
pub const JOBS_FILE: &str = "jobs.json";
pub const ABILITIES_FILE: &str = "abilities.json";

/// The three catalog tables a character is expanded against
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub items: LookupTable<Item>,
    pub jobs: LookupTable<Job>,
    pub abilities: LookupTable<Ability>,
}

impl Catalog {
    pub fn new(
        items: LookupTable<Item>,
        jobs: LookupTable<Job>,
        abilities: LookupTable<Ability>,
    ) -> Self {
        Catalog {
            items,
            jobs,
            abilities,
        }
    }

    /// Load the catalog from `items.json`, `jobs.json` and `abilities.json`
    /// in a directory. A missing file leaves that table empty.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        Ok(Catalog {
            items: load_table(&dir.join(ITEMS_FILE))?,
            jobs: load_table(&dir.join(JOBS_FILE))?,
            abilities: load_table(&dir.join(ABILITIES_FILE))?,
        })
    }
}

/// Load a single table file holding a JSON array of records
pub fn load_table<T>(path: &Path) -> Result<LookupTable<T>, ConfigError>
where
    T: Keyed + DeserializeOwned,
{
    if !path.exists() {
        return Ok(LookupTable::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        error: e,
        path: Some(path.to_path_buf()),
    })?;

    let records: Vec<T> = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
        error: e,
        path: path.to_path_buf(),
    })?;

    Ok(LookupTable::from_records(records))
}
