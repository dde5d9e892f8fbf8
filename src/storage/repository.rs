//! Shared, persisted access to the auto-response store
//!
//! Every successful mutation is written back to the file before the lock is
//! released, so the file never lags behind what handlers have confirmed.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, error, info};

use crate::utils::errors::{LotPilotError, Result, ValidationError};
use super::store::AutoResponseStore;

#[derive(Debug, Clone)]
pub struct CommandRepository {
    store: Arc<RwLock<AutoResponseStore>>,
    path: PathBuf,
}

impl CommandRepository {
    /// Load the command file at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let store = AutoResponseStore::load(&path)?;
        info!(path = %path.display(), commands = store.len(), "Loaded auto-response commands");

        Ok(Self::with_store(store, path))
    }

    pub fn with_store(store: AutoResponseStore, path: impl Into<PathBuf>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run a read-only query against the store
    pub fn read<R>(&self, f: impl FnOnce(&AutoResponseStore) -> R) -> R {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Apply a mutation and persist it.
    ///
    /// Validation failures leave both the store and the file untouched.
    pub fn update<R>(
        &self,
        f: impl FnOnce(&mut AutoResponseStore) -> std::result::Result<R, ValidationError>,
    ) -> Result<R> {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        let mut draft = store.clone();

        let result = match f(&mut draft) {
            Ok(result) => result,
            Err(e) => {
                debug!(error = %e, "Rejected auto-response change");
                return Err(LotPilotError::Validation(e));
            }
        };

        if let Err(e) = draft.save(&self.path) {
            error!(path = %self.path.display(), error = %e, "Failed to save auto-response file");
            return Err(e);
        }

        *store = draft;
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.read(|store| store.len())
    }

    pub fn is_empty(&self) -> bool {
        self.read(|store| store.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_update_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auto_response.cfg");
        let repo = CommandRepository::open(&path).unwrap();

        let index = repo.update(|store| store.add_group("hello")).unwrap();
        assert_eq!(index, 0);

        let reopened = CommandRepository::open(&path).unwrap();
        assert_eq!(reopened.read(|store| store.sections()), vec!["hello"]);
    }

    #[test]
    fn test_rejected_update_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auto_response.cfg");
        let repo = CommandRepository::open(&path).unwrap();
        repo.update(|store| store.add_group("foo")).unwrap();

        let result = repo.update(|store| store.add_group("foo|bar"));
        assert_matches!(result, Err(LotPilotError::Validation(ValidationError::AliasExists(_))));
        assert_eq!(repo.len(), 1);
        assert!(!repo.read(|store| store.contains_alias("bar")));
    }

    #[test]
    fn test_failed_save_keeps_memory_in_sync_with_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes every write fail
        let path = dir.path().join("blocked");
        std::fs::create_dir(&path).unwrap();
        let repo = CommandRepository::with_store(AutoResponseStore::new(), &path);

        assert!(repo.update(|store| store.add_group("hello")).is_err());
        assert!(repo.is_empty());
    }
}
