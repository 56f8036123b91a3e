// src/history/mod.rs
pub mod store;

pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};

/// Key under which the serialized log lives in the store.
pub const HISTORY_KEY: &str = "dork_query_history";

pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Newest-first, de-duplicated, bounded log of built queries.
///
/// Persistence is best effort: read and write failures are logged and the
/// log carries on in memory.
pub struct QueryHistory {
    entries: Vec<String>,
    store: Box<dyn KeyValueStore>,
}

fn read_entries(store: &dyn KeyValueStore) -> store::Result<Vec<String>> {
    match store.get(HISTORY_KEY)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

impl QueryHistory {
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let mut entries = read_entries(store.as_ref()).unwrap_or_else(|e| {
            log::warn!("Failed to load query history: {}", e);
            Vec::new()
        });
        entries.truncate(MAX_HISTORY_ENTRIES);

        Self { entries, store }
    }

    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()))
    }

    pub fn record(&mut self, query: &str) {
        if query.trim().is_empty() {
            return;
        }

        self.entries.retain(|existing| existing != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(MAX_HISTORY_ENTRIES);
        self.persist();
    }

    pub fn list(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.remove(HISTORY_KEY) {
            log::warn!("Failed to clear query history: {}", e);
        }
    }

    fn persist(&mut self) {
        let serialized = match serde_json::to_string(&self.entries) {
            Ok(serialized) => serialized,
            Err(e) => {
                log::warn!("Failed to serialize query history: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(HISTORY_KEY, &serialized) {
            log::warn!("Failed to save query history: {}", e);
        }
    }
}
