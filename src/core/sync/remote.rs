use crate::errors::AppResult;
use crate::models::entry::Entry;
use crate::models::profile::Profile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The authenticated account returned by login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: serde_json::Value,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    #[serde(rename = "full_name", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Server of record for a caregiver's log, scoped by the session token.
///
/// Failures come back as `Network`, `Auth` or `NotFound`.
#[async_trait]
pub trait RemoteLogService: Send + Sync {
    /// `None` when no profile was saved yet.
    async fn fetch_profile(&self) -> AppResult<Option<Profile>>;

    async fn save_profile(&self, profile: &Profile) -> AppResult<Profile>;

    async fn fetch_entries(&self) -> AppResult<Vec<Entry>>;

    /// Returns the stored entry with its server-assigned id.
    async fn create_entry(&self, entry: &Entry) -> AppResult<Entry>;

    async fn update_entry(&self, id: &str, entry: &Entry) -> AppResult<Entry>;

    async fn delete_entry(&self, id: &str) -> AppResult<()>;
}
