//! Workspace capability flags consumed by the view options controller.

use crate::types::WorkspaceSlug;

/// Feature switches that change which options are presentable.
pub trait CapabilityFlags {
    /// Whether the estimate feature is active for `scope`.
    fn is_estimate_active(&self, scope: &WorkspaceSlug) -> bool;
}

/// The same answer for every workspace.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCapabilities {
    pub estimates: bool,
}

impl FixedCapabilities {
    pub fn with_estimates(estimates: bool) -> Self {
        FixedCapabilities { estimates }
    }
}

impl CapabilityFlags for FixedCapabilities {
    fn is_estimate_active(&self, _scope: &WorkspaceSlug) -> bool {
        self.estimates
    }
}
