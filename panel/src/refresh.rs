//! Fetch chain: catalog tables, then the character, then expansion

use crate::api::{Backend, BackendError};
use stat_core::{expand, EffectiveCharacter};
use std::path::PathBuf;
use tables_core::Catalog;
use tracing::{debug, error, info, warn};

/// What the panel knows about the viewer's battler
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CharacterView {
    /// Not fetched yet
    #[default]
    Loading,
    /// The viewer has no battler
    Missing,
    /// The last fetch failed
    Unavailable,
    Loaded(Box<EffectiveCharacter>),
}

impl CharacterView {
    pub fn character(&self) -> Option<&EffectiveCharacter> {
        match self {
            CharacterView::Loaded(character) => Some(&**character),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Refresher {
    pub user_id: String,
    pub token: String,
    /// Load tables from disk instead of the API
    pub catalog_dir: Option<PathBuf>,
}

impl Refresher {
    /// Fetch the three tables concurrently
    pub async fn catalog<B: Backend>(&self, backend: &B) -> Result<Catalog, BackendError> {
        if let Some(dir) = &self.catalog_dir {
            return Ok(Catalog::load(dir)?);
        }
        let (items, jobs, abilities) = tokio::try_join!(
            backend.get_item_table(&self.token),
            backend.get_job_table(&self.token),
            backend.get_ability_table(&self.token),
        )?;
        Ok(Catalog::new(items, jobs, abilities))
    }

    /// Run the whole chain. Never retries; failures become `Unavailable`.
    pub async fn refresh<B: Backend>(&self, backend: &B) -> CharacterView {
        let catalog = match self.catalog(backend).await {
            Ok(catalog) => {
                debug!(
                    items = catalog.items.len(),
                    jobs = catalog.jobs.len(),
                    abilities = catalog.abilities.len(),
                    "Catalog loaded"
                );
                catalog
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch catalog");
                return CharacterView::Unavailable;
            }
        };

        let raw = match backend.get_character(&self.user_id, &self.token).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(user_id = %self.user_id, "Viewer has no battler");
                return CharacterView::Missing;
            }
            Err(e) => {
                warn!(user_id = %self.user_id, error = %e, "Failed to fetch character");
                return CharacterView::Unavailable;
            }
        };

        match expand(&raw, &catalog) {
            Ok(character) => {
                info!(
                    name = %character.name,
                    hp = character.hp,
                    max_hp = character.max_hp,
                    ac = character.total_ac,
                    "Character loaded"
                );
                CharacterView::Loaded(Box::new(character))
            }
            Err(e) => {
                error!(
                    user_id = %self.user_id,
                    error = %e,
                    "Character references a missing record"
                );
                CharacterView::Unavailable
            }
        }
    }
}
