//! Client-local entry collection. The only component holding mutable state.

use crate::errors::AppResult;
use crate::models::entry::Entry;
use tracing::{debug, warn};

/// Where the store writes its full contents after each mutation.
pub trait EntryCache: Send {
    fn load_entries(&mut self) -> AppResult<Option<Vec<Entry>>>;
    fn save_entries(&mut self, entries: &[Entry]) -> AppResult<()>;
}

/// Entries unique by id, sorted by timestamp descending.
pub struct EventStore {
    entries: Vec<Entry>,
    cache: Option<Box<dyn EntryCache>>,
    initialized: bool,
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStore {
    /// Memory-only store, already initialized.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cache: None,
            initialized: true,
        }
    }

    /// Store backed by a cache that is not read yet. Nothing is written
    /// until `mark_initialized`, so an empty store never overwrites a
    /// non-empty cache on startup.
    pub fn with_cache(cache: Box<dyn EntryCache>) -> Self {
        Self {
            entries: Vec::new(),
            cache: Some(cache),
            initialized: false,
        }
    }

    /// Read the cache and open the persistence gate. Unreadable cache data
    /// counts as "nothing cached".
    pub fn load(cache: Box<dyn EntryCache>) -> Self {
        let mut store = Self::with_cache(cache);

        if let Some(c) = store.cache.as_mut() {
            match c.load_entries() {
                Ok(Some(entries)) => store.set_all(entries),
                Ok(None) => debug!("no cached entries"),
                Err(e) => warn!(error = %e, "ignoring unreadable entry cache"),
            }
        }

        store.initialized = true;
        store
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    /// Insert, keeping ids unique and the order by timestamp descending.
    pub fn add(&mut self, entry: Entry) {
        self.entries.retain(|e| e.id != entry.id);
        self.entries.push(entry);
        self.sort();
        self.persist();
    }

    /// Remove by id. Absent ids are a no-op. Returns the removed entry.
    pub fn remove(&mut self, id: &str) -> Option<Entry> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        let removed = self.entries.remove(pos);
        self.persist();
        Some(removed)
    }

    /// Swap the entry stored under `id` for `entry` (which may carry a new
    /// id). Returns false when `id` is absent.
    pub fn replace(&mut self, id: &str, entry: Entry) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.entries.retain(|e| e.id != id && e.id != entry.id);
        self.entries.push(entry);
        self.sort();
        self.persist();
        true
    }

    /// Wholesale replacement (remote fetch or import).
    pub fn hydrate(&mut self, entries: Vec<Entry>) {
        self.set_all(entries);
        self.persist();
    }

    pub fn all(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set_all(&mut self, entries: Vec<Entry>) {
        self.entries.clear();
        for e in entries {
            self.entries.retain(|x| x.id != e.id);
            self.entries.push(e);
        }
        self.sort();
    }

    fn sort(&mut self) {
        self.entries.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.id.cmp(&b.id))
        });
    }

    fn persist(&mut self) {
        if !self.initialized {
            return;
        }
        if let Some(c) = self.cache.as_mut()
            && let Err(e) = c.save_entries(&self.entries)
        {
            warn!(error = %e, "failed to write entry cache");
        }
    }
}
