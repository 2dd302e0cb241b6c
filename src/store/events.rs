//! Outcomes of background persistence, published on the store's side channel.

use crate::types::WorkspaceSlug;

/// Result of a load or a detached save.
///
/// `revision` is the store-local counter of the mutation that triggered the
/// save. A failed save never rolls back in-memory state, so receivers use it
/// to tell whether the failure concerns the latest mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceEvent {
    Saved {
        scope: WorkspaceSlug,
        revision: u64,
    },
    SaveFailed {
        scope: WorkspaceSlug,
        revision: u64,
        message: String,
    },
    /// Loading the bundle failed and defaults were used instead.
    LoadFailed {
        scope: WorkspaceSlug,
        message: String,
    },
}

impl PersistenceEvent {
    pub fn scope(&self) -> &WorkspaceSlug {
        match self {
            PersistenceEvent::Saved { scope, .. }
            | PersistenceEvent::SaveFailed { scope, .. }
            | PersistenceEvent::LoadFailed { scope, .. } => scope,
        }
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, PersistenceEvent::Saved { .. })
    }
}
