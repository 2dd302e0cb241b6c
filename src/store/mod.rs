//! The per-workspace view state store.
//!
//! `ViewStateStore` owns the in-memory [`ViewPreferences`] for the active
//! workspace scope. Mutators are synchronous: they update memory, bump the
//! revision and hand a copy of the bundle to a detached save task. The caller
//! never waits on persistence, and a failed save is reported on the
//! [`PersistenceEvent`] channel without touching in-memory state.
//!
//! Saves are chained: each task waits for the previous one before writing, so
//! the last mutation is also the last bundle written.

pub mod backend;
pub mod events;

use std::sync::Arc;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::error::{Result, VistaError};
use crate::filter::{FilterKey, FilterValue};
use crate::preferences::ViewPreferences;
use crate::properties::PropertyName;
use crate::rules::allowed_group_by;
use crate::types::{GroupBy, OrderBy, ViewType, WorkspaceSlug};

pub use backend::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use events::PersistenceEvent;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Point-in-time copy of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    pub scope: Option<WorkspaceSlug>,
    #[serde(flatten)]
    pub preferences: ViewPreferences,
}

pub struct ViewStateStore {
    scope: Option<WorkspaceSlug>,
    state: ViewPreferences,
    defaults: ViewPreferences,
    backend: Arc<dyn PreferenceStore>,
    runtime: Handle,
    events: broadcast::Sender<PersistenceEvent>,
    revision: u64,
    last_write: Option<JoinHandle<()>>,
}

impl ViewStateStore {
    /// Create a store with no scope, spawning saves on the current runtime.
    pub fn new(backend: Arc<dyn PreferenceStore>) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| VistaError::Runtime(format!("view state store needs a tokio runtime: {e}")))?;
        Ok(Self::with_runtime(backend, runtime))
    }

    pub fn with_runtime(backend: Arc<dyn PreferenceStore>, runtime: Handle) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        ViewStateStore {
            scope: None,
            state: ViewPreferences::default(),
            defaults: ViewPreferences::default(),
            backend,
            runtime,
            events,
            revision: 0,
            last_write: None,
        }
    }

    /// Use `defaults` for scopes with nothing persisted.
    pub fn with_defaults(mut self, defaults: ViewPreferences) -> Self {
        if self.scope.is_none() {
            self.state = defaults.clone();
        }
        self.defaults = defaults;
        self
    }

    /// Receive outcomes of loads and background saves.
    pub fn subscribe(&self) -> broadcast::Receiver<PersistenceEvent> {
        self.events.subscribe()
    }

    pub fn scope(&self) -> Option<&WorkspaceSlug> {
        self.scope.as_ref()
    }

    /// Current in-memory state. Without a scope this is the default bundle.
    pub fn state(&self) -> &ViewPreferences {
        &self.state
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            scope: self.scope.clone(),
            preferences: self.state.clone(),
        }
    }

    /// Number of mutations applied since the store was created.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Make `scope` the active workspace.
    ///
    /// The new state comes from the backend, or from defaults when nothing is
    /// persisted or the load fails. Nothing of the previous scope carries
    /// over. Outstanding saves finish before the load. Switching to the
    /// active scope is a no-op.
    pub async fn switch_scope(&mut self, scope: WorkspaceSlug) {
        if self.scope.as_ref() == Some(&scope) {
            return;
        }

        // A pending save may target the scope being loaded.
        self.flush().await;

        let mut loaded = match self.backend.load(&scope).await {
            Ok(Some(preferences)) => preferences,
            Ok(None) => {
                tracing::debug!("no persisted view preferences for '{scope}', using defaults");
                self.defaults.clone()
            }
            Err(e) => {
                tracing::warn!("Failed to load view preferences for '{scope}': {e}");
                let _ = self.events.send(PersistenceEvent::LoadFailed {
                    scope: scope.clone(),
                    message: e.to_string(),
                });
                self.defaults.clone()
            }
        };

        tracing::debug!("switched view scope to '{scope}'");
        ensure_board_grouping(&mut loaded);
        self.scope = Some(scope);
        self.state = loaded;
    }

    /// Drop the active scope and fall back to the default bundle.
    pub fn clear_scope(&mut self) {
        self.scope = None;
        self.state = self.defaults.clone();
    }

    /// Replace the active view type. Grouping, ordering and filters are kept.
    ///
    /// Kanban needs a grouping key, so entering it without one selects the
    /// first key kanban offers in the same mutation.
    pub fn set_view(&mut self, view: ViewType) {
        self.state.view = view;
        ensure_board_grouping(&mut self.state);
        self.commit();
    }

    pub fn set_group_by(&mut self, group_by: GroupBy) {
        self.state.group_by = group_by;
        self.commit();
    }

    pub fn set_order_by(&mut self, order_by: OrderBy) {
        self.state.order_by = order_by;
        self.commit();
    }

    pub fn set_show_empty_groups(&mut self, show: bool) {
        self.state.show_empty_groups = show;
        self.commit();
    }

    /// Flip the visibility of a display property, returning the new value.
    pub fn toggle_property(&mut self, name: PropertyName) -> bool {
        let visible = self.state.properties.toggle(name);
        self.commit();
        visible
    }

    /// Apply a filter selection with the per-key rules of
    /// [`IssueFilters::select`](crate::filter::IssueFilters::select).
    pub fn set_filter(&mut self, key: FilterKey, value: FilterValue) -> Result<()> {
        self.state.filters.select(key, value)?;
        self.commit();
        Ok(())
    }

    /// Store `value` for `key` without toggling; `None` clears the key.
    pub fn assign_filter(&mut self, key: FilterKey, value: Option<FilterValue>) -> Result<()> {
        self.state.filters.assign(key, value)?;
        self.commit();
        Ok(())
    }

    /// Reset every filter to unconstrained.
    pub fn clear_filters(&mut self) {
        self.state.filters.clear();
        self.commit();
    }

    /// Wait until every save spawned so far has finished.
    pub async fn flush(&mut self) {
        if let Some(handle) = self.last_write.take()
            && let Err(e) = handle.await
        {
            tracing::warn!("view preference write task failed: {e}");
        }
    }

    fn commit(&mut self) {
        self.revision += 1;

        let Some(scope) = self.scope.clone() else {
            tracing::debug!("view state changed without a workspace scope; not persisting");
            return;
        };

        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        let preferences = self.state.clone();
        let revision = self.revision;
        let previous = self.last_write.take();

        self.last_write = Some(self.runtime.spawn(async move {
            if let Some(previous) = previous {
                let _ = previous.await;
            }

            let event = match backend.save(&scope, &preferences).await {
                Ok(()) => PersistenceEvent::Saved { scope, revision },
                Err(e) => {
                    tracing::warn!("Failed to save view preferences for '{scope}': {e}");
                    PersistenceEvent::SaveFailed {
                        scope,
                        revision,
                        message: e.to_string(),
                    }
                }
            };
            let _ = events.send(event);
        }));
    }
}

/// Give kanban its first offered grouping key when none is active.
fn ensure_board_grouping(state: &mut ViewPreferences) {
    if state.view == ViewType::Kanban
        && state.group_by == GroupBy::NoGrouping
        && let Some(first) = allowed_group_by(ViewType::Kanban).first()
    {
        state.group_by = *first;
    }
}
