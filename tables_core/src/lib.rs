mod registry;
mod table;

pub use registry::{load_table, Catalog, ABILITIES_FILE, ITEMS_FILE, JOBS_FILE};
pub use table::{Keyed, LookupTable};

use item_core::RecordId;
use std::path::PathBuf;
use thiserror::Error;

/// Error loading catalog tables from disk
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{}': {error}", .path.display())]
    Parse {
        error: serde_json::Error,
        path: PathBuf,
    },
}

/// A referenced id is absent from its table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Unknown id '{id}' in {table} table")]
    Missing { table: &'static str, id: RecordId },
}
