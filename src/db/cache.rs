//! Persisted local cache: a serialized entry array and a serialized profile,
//! stored as JSON values in the `cache` table.

use crate::core::store::EntryCache;
use crate::core::sync::ProfileCache;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry::Entry;
use crate::models::profile::Profile;
use chrono::Local;
use rusqlite::{OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

pub const KEY_ENTRIES: &str = "entries";
pub const KEY_PROFILE: &str = "profile";

pub struct LocalCache {
    pool: DbPool,
}

impl LocalCache {
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn pool(&mut self) -> &mut DbPool {
        &mut self.pool
    }

    pub fn get_raw(&self, key: &str) -> AppResult<Option<String>> {
        let value = self
            .pool
            .conn
            .query_row("SELECT value FROM cache WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn put_raw(&self, key: &str, value: &str) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT INTO cache (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.get_raw(key)? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| AppError::CacheCorrupt(format!("{key}: {e}"))),
        }
    }

    fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.put_raw(key, &raw)
    }

    /// Append an audit line; failures are logged, never propagated.
    pub fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = ttlog(&self.pool.conn, operation, target, message) {
            warn!(error = %e, operation, "failed to write audit log");
        }
    }
}

impl EntryCache for LocalCache {
    fn load_entries(&mut self) -> AppResult<Option<Vec<Entry>>> {
        self.get_json(KEY_ENTRIES)
    }

    fn save_entries(&mut self, entries: &[Entry]) -> AppResult<()> {
        self.put_json(KEY_ENTRIES, entries)
    }
}

impl ProfileCache for LocalCache {
    fn load_profile(&mut self) -> AppResult<Option<Profile>> {
        self.get_json(KEY_PROFILE)
    }

    fn save_profile(&mut self, profile: &Profile) -> AppResult<()> {
        self.put_json(KEY_PROFILE, profile)
    }
}
