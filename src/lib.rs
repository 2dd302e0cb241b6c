#[macro_use]
mod macros;

pub mod capabilities;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod paths;
pub mod preferences;
pub mod properties;
pub mod rules;
pub mod store;
pub mod types;
pub mod utils;

pub use capabilities::{CapabilityFlags, FixedCapabilities};
pub use config::Config;
pub use controller::{UiEvent, ViewOptionsController, ViewOptionsModel};
pub use error::{KeyKind, Result, VistaError};
pub use filter::{FilterKey, FilterKind, FilterValue, IssueFilters};
pub use preferences::ViewPreferences;
pub use properties::{DisplayProperties, PropertyName};
pub use store::{
    FilePreferenceStore, MemoryPreferenceStore, PersistenceEvent, PreferenceStore, ViewSnapshot,
    ViewStateStore,
};
pub use types::{GroupBy, IssueTypeFilter, OrderBy, ViewType, WorkspaceSlug};
pub use utils::{same_elements, toggle_value};
