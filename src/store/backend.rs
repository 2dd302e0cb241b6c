//! Preference persistence backends.
//!
//! A backend loads and saves one [`ViewPreferences`] bundle per workspace.
//! It never sees partial updates: every save carries the full bundle.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::fs as tokio_fs;

use crate::error::{Result, VistaError};
use crate::preferences::ViewPreferences;
use crate::types::WorkspaceSlug;

/// Load/save boundary for persisted view preferences.
#[async_trait::async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Load the bundle for `scope`, `None` if nothing was ever saved.
    async fn load(&self, scope: &WorkspaceSlug) -> Result<Option<ViewPreferences>>;

    /// Replace the bundle for `scope`.
    async fn save(&self, scope: &WorkspaceSlug, preferences: &ViewPreferences) -> Result<()>;
}

/// In-memory backend.
///
/// Saves and loads can be switched to fail, which is how callers exercise
/// the optimistic-update path without a real storage outage.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: DashMap<WorkspaceSlug, ViewPreferences>,
    fail_saves: AtomicBool,
    fail_loads: AtomicBool,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a bundle without going through `save`.
    pub fn insert(&self, scope: WorkspaceSlug, preferences: ViewPreferences) {
        self.entries.insert(scope, preferences);
    }

    /// The bundle last saved for `scope`.
    pub fn get(&self, scope: &WorkspaceSlug) -> Option<ViewPreferences> {
        self.entries.get(scope).map(|entry| entry.value().clone())
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn load(&self, scope: &WorkspaceSlug) -> Result<Option<ViewPreferences>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(VistaError::Persistence(format!(
                "preferences for '{scope}' are unavailable"
            )));
        }
        Ok(self.get(scope))
    }

    async fn save(&self, scope: &WorkspaceSlug, preferences: &ViewPreferences) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(VistaError::Persistence(format!(
                "preferences for '{scope}' could not be written"
            )));
        }
        self.entries.insert(scope.clone(), preferences.clone());
        Ok(())
    }
}

/// One YAML file per workspace under a directory.
#[derive(Debug)]
pub struct FilePreferenceStore {
    dir: PathBuf,
    write_seq: AtomicU64,
}

impl FilePreferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FilePreferenceStore {
            dir: dir.into(),
            write_seq: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the bundle file for `scope`.
    pub fn file_path(&self, scope: &WorkspaceSlug) -> PathBuf {
        self.dir.join(format!("{scope}.yaml"))
    }
}

#[async_trait::async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn load(&self, scope: &WorkspaceSlug) -> Result<Option<ViewPreferences>> {
        let path = self.file_path(scope);
        if !tokio_fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }

        let content = tokio_fs::read_to_string(&path).await.map_err(|e| {
            VistaError::Persistence(format!(
                "Failed to read preferences at {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut preferences: ViewPreferences = serde_yaml_ng::from_str(&content).map_err(|e| {
            VistaError::Persistence(format!(
                "Failed to parse preferences at {}: {}",
                path.display(),
                e
            ))
        })?;
        preferences.filters = std::mem::take(&mut preferences.filters)
            .validated()
            .map_err(|e| {
                VistaError::Persistence(format!(
                    "Invalid filters in preferences at {}: {}",
                    path.display(),
                    e
                ))
            })?;
        Ok(Some(preferences))
    }

    async fn save(&self, scope: &WorkspaceSlug, preferences: &ViewPreferences) -> Result<()> {
        let path = self.file_path(scope);
        tokio_fs::create_dir_all(&self.dir).await.map_err(|e| {
            VistaError::Persistence(format!(
                "Failed to create preferences directory at {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let content = serde_yaml_ng::to_string(preferences)?;

        // Write to a unique temp file and rename so readers never see a
        // half-written bundle.
        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        let tmp = self.dir.join(format!(".{scope}.{seq}.tmp"));
        tokio_fs::write(&tmp, content).await.map_err(|e| {
            VistaError::Persistence(format!(
                "Failed to write preferences at {}: {}",
                tmp.display(),
                e
            ))
        })?;
        tokio_fs::rename(&tmp, &path).await.map_err(|e| {
            VistaError::Persistence(format!(
                "Failed to move preferences into place at {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GroupBy, ViewType};
    use tempfile::TempDir;

    fn slug(s: &str) -> WorkspaceSlug {
        WorkspaceSlug::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.load(&slug("acme")).await.unwrap(), None);

        let prefs = ViewPreferences {
            view: ViewType::Kanban,
            ..Default::default()
        };
        store.save(&slug("acme"), &prefs).await.unwrap();
        assert_eq!(store.load(&slug("acme")).await.unwrap(), Some(prefs));
        assert_eq!(store.load(&slug("globex")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_failure_switches() {
        let store = MemoryPreferenceStore::new();
        store.set_fail_saves(true);
        assert!(matches!(
            store.save(&slug("acme"), &ViewPreferences::default()).await,
            Err(VistaError::Persistence(_))
        ));
        assert_eq!(store.get(&slug("acme")), None);

        store.set_fail_loads(true);
        assert!(store.load(&slug("acme")).await.is_err());
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = FilePreferenceStore::new(tmp.path().join("views"));
        assert_eq!(store.load(&slug("acme")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let store = FilePreferenceStore::new(tmp.path().join("views"));
        let prefs = ViewPreferences {
            group_by: GroupBy::Labels,
            show_empty_groups: false,
            ..Default::default()
        };

        store.save(&slug("acme"), &prefs).await.unwrap();
        assert!(store.file_path(&slug("acme")).exists());
        assert_eq!(store.load(&slug("acme")).await.unwrap(), Some(prefs));

        let leftovers: Vec<_> = std::fs::read_dir(store.dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let store = FilePreferenceStore::new(tmp.path());
        std::fs::write(store.file_path(&slug("acme")), "properties:\n  avatar: true\n").unwrap();

        assert!(matches!(
            store.load(&slug("acme")).await,
            Err(VistaError::Persistence(_))
        ));
    }

    #[tokio::test]
    async fn test_file_store_invalid_filters_are_error() {
        let tmp = TempDir::new().unwrap();
        let store = FilePreferenceStore::new(tmp.path());

        for content in [
            "filters:\n  labels: [bug, bug]\n",
            "filters:\n  start_date: ['garbage']\n",
        ] {
            std::fs::write(store.file_path(&slug("acme")), content).unwrap();
            match store.load(&slug("acme")).await {
                Err(VistaError::Persistence(message)) => {
                    assert!(message.contains("Invalid filters"), "{message}");
                }
                other => panic!("expected Persistence error, got {other:?}"),
            }
        }
    }
}
