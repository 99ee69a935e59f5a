//! Metadata shared by every logger with the same application id
//!
//! Each update is a read-merge-write performed under the write lock, so a
//! reader never sees a half-applied merge. Concurrent writers race with
//! last-writer-wins semantics per key.

use super::log_meta::LogMeta;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Keyed `app_id -> LogMeta` store.
///
/// Entries are created on first update of an application id and are never
/// torn down.
///
/// # Example
///
/// ```
/// use rust_tagged_logger::core::{LogMeta, MetaStore};
/// use serde_json::json;
///
/// let store = MetaStore::new();
/// store.update("billing", LogMeta::bake(json!({"region": "eu"})));
/// store.update("billing", LogMeta::bake(json!({"host": "node-1"})));
///
/// let meta = store.get("billing");
/// assert_eq!(meta.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MetaStore {
    entries: RwLock<HashMap<String, LogMeta>>,
}

impl MetaStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Process-wide default store.
    pub fn global() -> Arc<MetaStore> {
        static GLOBAL: OnceLock<Arc<MetaStore>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(MetaStore::new())))
    }

    /// Current metadata for `app_id`, or the empty metadata.
    pub fn get(&self, app_id: &str) -> LogMeta {
        self.entries
            .read()
            .get(app_id)
            .cloned()
            .unwrap_or_else(LogMeta::empty)
    }

    /// Shallow-merge `fields` over the stored metadata for `app_id`.
    ///
    /// Returns the new stored value.
    pub fn update(&self, app_id: &str, fields: impl Into<LogMeta>) -> LogMeta {
        let incoming = LogMeta::bake(fields);
        let mut entries = self.entries.write();

        let merged = match entries.get(app_id) {
            Some(current) => LogMeta::merge(current, &incoming),
            None => incoming,
        };
        entries.insert(app_id.to_string(), merged.clone());
        merged
    }

    pub fn contains(&self, app_id: &str) -> bool {
        self.entries.read().contains_key(app_id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_app_is_empty() {
        let store = MetaStore::new();
        assert!(store.get("unknown").is_empty());
        assert!(!store.contains("unknown"));
    }

    #[test]
    fn test_update_merges_last_writer_wins() {
        let store = MetaStore::new();
        store.update("app", json!({"username": "John", "role": "admin"}));
        let meta = store.update("app", json!({"role": "guest"}));

        assert_eq!(meta.get("username"), Some(&json!("John")));
        assert_eq!(meta.get("role"), Some(&json!("guest")));
        assert_eq!(store.get("app"), meta);
    }

    #[test]
    fn test_empty_update_registers_app_with_canonical_empty() {
        let store = MetaStore::new();
        let meta = store.update("app", LogMeta::empty());
        assert!(meta.is_empty());
        assert!(store.contains("app"));
        assert!(store.get("app").is_empty());
    }

    #[test]
    fn test_apps_are_isolated() {
        let store = MetaStore::new();
        store.update("a", json!({"k": 1}));
        store.update("b", json!({"k": 2}));
        assert_eq!(store.get("a").get("k"), Some(&json!(1)));
        assert_eq!(store.get("b").get("k"), Some(&json!(2)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_concurrent_updates_keep_every_key() {
        let store = Arc::new(MetaStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let mut fields = serde_json::Map::new();
                    fields.insert(format!("key{}", i), json!(i));
                    store.update("shared", fields);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.get("shared").len(), 8);
    }

    #[test]
    fn test_global_is_shared() {
        let a = MetaStore::global();
        let b = MetaStore::global();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
