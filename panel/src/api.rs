//! REST client for the game server

use item_core::{Ability, Item, Job, RawCharacter};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tables_core::{Keyed, LookupTable};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("Catalog error: {0}")]
    Catalog(#[from] tables_core::ConfigError),
}

/// Data the panel fetches from the game server
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Character record, or None if the viewer has no battler yet
    async fn get_character(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<Option<RawCharacter>, BackendError>;

    async fn get_item_table(&self, token: &str) -> Result<LookupTable<Item>, BackendError>;

    async fn get_job_table(&self, token: &str) -> Result<LookupTable<Job>, BackendError>;

    async fn get_ability_table(&self, token: &str) -> Result<LookupTable<Ability>, BackendError>;

    /// Provision a new battler for the viewer
    async fn create_character(&self, user_id: &str, token: &str) -> Result<(), BackendError>;
}

/// Bearer-authenticated HTTP implementation
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base: base.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    async fn get_table<T>(&self, path: &str, token: &str) -> Result<LookupTable<T>, BackendError>
    where
        T: Keyed + DeserializeOwned,
    {
        let url = self.url(path);
        let resp = self.http.get(&url).bearer_auth(token).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                url,
                status: status.as_u16(),
            });
        }
        let records: Vec<T> = resp.json().await?;
        debug!(table = T::TABLE, count = records.len(), "Fetched table");
        Ok(LookupTable::from_records(records))
    }
}

impl Backend for ApiClient {
    async fn get_character(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<Option<RawCharacter>, BackendError> {
        let url = self.url(&format!("users/{}", user_id));
        let resp = self.http.get(&url).bearer_auth(token).send().await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(BackendError::Status {
                url,
                status: status.as_u16(),
            });
        }
        Ok(Some(resp.json().await?))
    }

    async fn get_item_table(&self, token: &str) -> Result<LookupTable<Item>, BackendError> {
        self.get_table("items", token).await
    }

    async fn get_job_table(&self, token: &str) -> Result<LookupTable<Job>, BackendError> {
        self.get_table("jobs", token).await
    }

    async fn get_ability_table(&self, token: &str) -> Result<LookupTable<Ability>, BackendError> {
        self.get_table("abilities", token).await
    }

    async fn create_character(&self, user_id: &str, token: &str) -> Result<(), BackendError> {
        let url = self.url("users");
        let body = serde_json::json!({ "userId": user_id });
        let resp = self.http.post(&url).bearer_auth(token).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                url,
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
