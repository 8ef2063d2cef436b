use crate::io::storage::{KeyValueStore, StoreError};
use crate::model::CompletionSet;

/// Versioned key the completion set is stored under
pub const STORAGE_KEY: &str = "shiplist:v1";

/// Loads and saves the completion set. The checklist session talks only to
/// this trait, so tests can hand it an in-memory store.
pub trait ProgressStore {
    /// Read saved progress. Never fails: anything unreadable is "no progress yet".
    fn load(&self) -> CompletionSet;
    /// Overwrite saved progress with `set`.
    fn save(&mut self, set: &CompletionSet) -> Result<(), StoreError>;
}

impl<P: ProgressStore + ?Sized> ProgressStore for Box<P> {
    fn load(&self) -> CompletionSet {
        (**self).load()
    }

    fn save(&mut self, set: &CompletionSet) -> Result<(), StoreError> {
        (**self).save(set)
    }
}

/// Progress kept under a single key of a key-value store.
#[derive(Debug, Clone)]
pub struct KeyedProgress<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KeyedProgress<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        KeyedProgress {
            store,
            key: key.to_string(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The raw persisted value, if any
    pub fn raw(&self) -> Option<String> {
        self.store.get_item(&self.key).ok().flatten()
    }
}

impl<S: KeyValueStore> ProgressStore for KeyedProgress<S> {
    fn load(&self) -> CompletionSet {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no saved progress");
                return CompletionSet::new();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not read saved progress");
                return CompletionSet::new();
            }
        };
        parse_completion(&raw).unwrap_or_else(|| {
            tracing::warn!(key = %self.key, "saved progress is not a list of ids, starting empty");
            CompletionSet::new()
        })
    }

    fn save(&mut self, set: &CompletionSet) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(set)?;
        self.store.set_item(&self.key, &encoded)?;
        tracing::debug!(key = %self.key, count = set.len(), "saved progress");
        Ok(())
    }
}

/// Parse a stored value. Only a JSON array of strings is accepted.
pub fn parse_completion(raw: &str) -> Option<CompletionSet> {
    if raw.is_empty() {
        return None;
    }
    serde_json::from_str::<CompletionSet>(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::{FileStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_key_loads_empty() {
        let progress = KeyedProgress::new(MemoryStore::new());
        assert!(progress.load().is_empty());
    }

    #[test]
    fn malformed_values_load_empty() {
        for raw in [
            "not json {{{",
            "{\"a\": true}",
            "[1, 2, 3]",
            "[\"ok\", 2]",
            "\"just a string\"",
            "null",
            "",
        ] {
            let progress = KeyedProgress::new(MemoryStore::with_item(STORAGE_KEY, raw));
            assert!(progress.load().is_empty(), "expected empty for {raw:?}");
        }
    }

    #[test]
    fn save_writes_json_list_under_key() {
        let mut progress = KeyedProgress::new(MemoryStore::new());
        let set = CompletionSet::new().toggle("b").toggle("a");
        progress.save(&set).unwrap();
        assert_eq!(progress.raw().as_deref(), Some(r#"["b","a"]"#));
        assert_eq!(progress.load(), set);
    }

    #[test]
    fn save_load_round_trip_including_empty() {
        let mut progress = KeyedProgress::new(MemoryStore::new());
        for set in [
            CompletionSet::new(),
            ["x"].into_iter().collect(),
            ["a", "b", "stale-id", "with \"quotes\""].into_iter().collect(),
        ] {
            progress.save(&set).unwrap();
            let loaded = progress.load();
            progress.save(&loaded).unwrap();
            assert_eq!(progress.load(), set);
        }
    }

    #[test]
    fn failed_write_is_reported_to_caller() {
        let mut progress = KeyedProgress::new(MemoryStore::new());
        progress.store_mut().fail_writes(true);
        assert!(progress.save(&CompletionSet::new().toggle("a")).is_err());
        assert!(progress.load().is_empty());
    }

    #[test]
    fn persists_through_file_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let mut progress = KeyedProgress::new(FileStore::new(&path));
        progress.save(&["foundation-icp"].into_iter().collect()).unwrap();

        let reopened = KeyedProgress::new(FileStore::new(&path));
        assert!(reopened.load().contains("foundation-icp"));
    }

    #[test]
    fn custom_key_is_isolated() {
        let mut store = MemoryStore::new();
        store.set_item(STORAGE_KEY, "[\"a\"]").unwrap();
        let progress = KeyedProgress::with_key(store, "shiplist:v2");
        assert!(progress.load().is_empty());
    }
}
