use crate::storage::entry::ProjectIndex;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::warn;

/// Keyed storage of the latest [`ProjectIndex`] per normalized project path.
///
/// Readers get an `Arc` snapshot; a replacement never mutates an index that a
/// reader already holds.
pub trait IndexStore: Send + Sync {
    /// Store `index` under `path`, replacing any existing entry
    fn put(&self, path: &str, index: ProjectIndex) -> Arc<ProjectIndex>;

    /// Store `index` unless the current entry has a higher generation.
    /// Returns whether the write was applied.
    fn put_if_newer(&self, path: &str, index: ProjectIndex) -> bool;

    fn get(&self, path: &str) -> Option<Arc<ProjectIndex>>;

    /// Remove the entry for `path`, returning it if present
    fn remove(&self, path: &str) -> Option<Arc<ProjectIndex>>;

    /// Paths that currently have an index
    fn paths(&self) -> Vec<String>;
}

/// In-process, non-persistent [`IndexStore`]
#[derive(Debug, Default)]
pub struct MemoryIndexStore {
    indexes: RwLock<HashMap<String, Arc<ProjectIndex>>>,
}

impl MemoryIndexStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IndexStore for MemoryIndexStore {
    fn put(&self, path: &str, index: ProjectIndex) -> Arc<ProjectIndex> {
        let index = Arc::new(index);
        self.indexes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), Arc::clone(&index));
        index
    }

    fn put_if_newer(&self, path: &str, index: ProjectIndex) -> bool {
        let mut indexes = self.indexes.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(current) = indexes.get(path) {
            if current.generation > index.generation {
                warn!(
                    "Discarding stale index for {} (generation {} < {})",
                    path, index.generation, current.generation
                );
                return false;
            }
        }

        indexes.insert(path.to_string(), Arc::new(index));
        true
    }

    fn get(&self, path: &str) -> Option<Arc<ProjectIndex>> {
        self.indexes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    fn remove(&self, path: &str) -> Option<Arc<ProjectIndex>> {
        self.indexes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
    }

    fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .indexes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        paths.sort();
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(path: &str, generation: u64) -> ProjectIndex {
        ProjectIndex::new(path.to_string(), Vec::new(), generation)
    }

    #[test]
    fn test_store_put_and_get() {
        let store = MemoryIndexStore::new();
        assert!(store.get("/p").is_none());

        store.put("/p", index("/p", 1));
        let stored = store.get("/p").unwrap();
        assert_eq!(stored.project_path, "/p");
        assert_eq!(stored.generation, 1);
    }

    #[test]
    fn test_store_put_replaces_unconditionally() {
        let store = MemoryIndexStore::new();
        store.put("/p", index("/p", 5));
        store.put("/p", index("/p", 2));
        assert_eq!(store.get("/p").unwrap().generation, 2);
    }

    #[test]
    fn test_store_put_if_newer_rejects_stale() {
        let store = MemoryIndexStore::new();
        assert!(store.put_if_newer("/p", index("/p", 3)));
        assert!(!store.put_if_newer("/p", index("/p", 2)));
        assert_eq!(store.get("/p").unwrap().generation, 3);
        assert!(store.put_if_newer("/p", index("/p", 3)));
        assert!(store.put_if_newer("/p", index("/p", 4)));
        assert_eq!(store.get("/p").unwrap().generation, 4);
    }

    #[test]
    fn test_store_snapshot_survives_replacement() {
        let store = MemoryIndexStore::new();
        store.put("/p", index("/p", 1));
        let snapshot = store.get("/p").unwrap();
        store.put("/p", index("/p", 2));
        assert_eq!(snapshot.generation, 1);
        assert_eq!(store.get("/p").unwrap().generation, 2);
    }

    #[test]
    fn test_store_remove() {
        let store = MemoryIndexStore::new();
        store.put("/a", index("/a", 1));
        store.put("/b", index("/b", 1));

        assert!(store.remove("/a").is_some());
        assert!(store.remove("/a").is_none());
        assert!(store.get("/a").is_none());
        assert_eq!(store.paths(), vec!["/b".to_string()]);
    }
}
