//! Top-level application configuration.
//!
//! Configuration is stored in `.vista/config.yaml` and includes:
//! - Defaults for workspaces without persisted preferences
//! - Workspaces with the estimate feature active
//! - An optional override for where preferences are persisted

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::capabilities::CapabilityFlags;
use crate::error::{Result, VistaError};
use crate::paths::{self, vista_root};
use crate::preferences::ViewPreferences;
use crate::rules::{allowed_group_by, shows_layout_controls};
use crate::types::{GroupBy, OrderBy, ViewType, WorkspaceSlug};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Initial layout for workspaces without persisted preferences
    #[serde(default, skip_serializing_if = "DefaultsConfig::is_default")]
    pub defaults: DefaultsConfig,

    /// Estimate feature switches
    #[serde(default, skip_serializing_if = "EstimatesConfig::is_empty")]
    pub estimates: EstimatesConfig,

    /// Directory holding one preferences file per workspace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences_dir: Option<PathBuf>,
}

/// Defaults applied when a workspace has no persisted bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub view: ViewType,

    #[serde(default)]
    pub group_by: GroupBy,

    #[serde(default)]
    pub order_by: OrderBy,

    #[serde(default = "default_show_empty_groups")]
    pub show_empty_groups: bool,
}

fn default_show_empty_groups() -> bool {
    true
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            view: ViewType::default(),
            group_by: GroupBy::default(),
            order_by: OrderBy::default(),
            show_empty_groups: default_show_empty_groups(),
        }
    }
}

impl DefaultsConfig {
    /// Check if this config has default values
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Estimate feature configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstimatesConfig {
    /// Workspaces whose estimate feature is active
    #[serde(default)]
    pub workspaces: Vec<WorkspaceSlug>,
}

impl EstimatesConfig {
    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        vista_root().join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            VistaError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the view options panel could never present.
    pub fn validate(&self) -> Result<()> {
        let DefaultsConfig { view, group_by, .. } = self.defaults;
        if shows_layout_controls(view) && !allowed_group_by(view).contains(&group_by) {
            return Err(VistaError::Config(format!(
                "default grouping '{group_by}' is not available in {view} view"
            )));
        }
        if self
            .preferences_dir
            .as_ref()
            .is_some_and(|dir| dir.as_os_str().is_empty())
        {
            return Err(VistaError::Config(
                "preferences_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                VistaError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            VistaError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        Ok(())
    }

    /// Directory for persisted preferences, honouring the override
    pub fn preferences_dir(&self) -> PathBuf {
        self.preferences_dir.clone().unwrap_or_else(paths::preferences_dir)
    }

    /// Bundle used for a workspace that has nothing persisted yet
    pub fn default_preferences(&self) -> ViewPreferences {
        ViewPreferences {
            view: self.defaults.view,
            group_by: self.defaults.group_by,
            order_by: self.defaults.order_by,
            show_empty_groups: self.defaults.show_empty_groups,
            ..ViewPreferences::default()
        }
    }

    /// Turn the estimate feature on or off for a workspace
    pub fn set_estimates(&mut self, scope: &WorkspaceSlug, active: bool) {
        self.estimates.workspaces.retain(|w| w != scope);
        if active {
            self.estimates.workspaces.push(scope.clone());
        }
    }
}

impl CapabilityFlags for Config {
    fn is_estimate_active(&self, scope: &WorkspaceSlug) -> bool {
        self.estimates.workspaces.contains(scope)
    }
}
