mod filter;
mod set;
mod show;

pub use filter::{cmd_clear_filters, cmd_filter};
pub use set::{
    cmd_empty_groups, cmd_estimates, cmd_group_by, cmd_issue_type, cmd_order_by, cmd_property,
    cmd_view,
};
pub use show::{cmd_options, cmd_query, cmd_show};

use std::sync::Arc;

use owo_colors::{OwoColorize, Stream};
use serde_json::Value;
use tokio::sync::broadcast;

use crate::config::Config;
use crate::controller::ViewOptionsController;
use crate::error::Result;
use crate::store::{FilePreferenceStore, PersistenceEvent, ViewSnapshot, ViewStateStore};
use crate::types::WorkspaceSlug;

/// Output of a command: JSON for `--json`, text otherwise.
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        CommandOutput { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print to stdout. Without a text form the JSON is printed either way.
    pub fn print(self, output_json: bool) -> Result<()> {
        match self.text {
            Some(text) if !output_json => println!("{text}"),
            _ => println!("{}", serde_json::to_string_pretty(&self.json)?),
        }
        Ok(())
    }
}

/// A workspace opened against the file-backed store.
pub(crate) struct Session {
    config: Config,
    store: ViewStateStore,
    events: broadcast::Receiver<PersistenceEvent>,
}

impl Session {
    pub(crate) async fn open(workspace: &str) -> Result<Self> {
        let scope = WorkspaceSlug::new(workspace)?;
        let config = Config::load()?;
        let backend = Arc::new(FilePreferenceStore::new(config.preferences_dir()));

        let mut store = ViewStateStore::new(backend)?.with_defaults(config.default_preferences());
        let events = store.subscribe();
        store.switch_scope(scope).await;

        Ok(Session {
            config,
            store,
            events,
        })
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn store(&self) -> &ViewStateStore {
        &self.store
    }

    pub(crate) fn controller(&mut self) -> ViewOptionsController<'_> {
        ViewOptionsController::new(&mut self.store, &self.config)
    }

    /// Wait for pending saves and report failures on stderr.
    ///
    /// A failed save does not fail the command: the change was applied, it
    /// just did not reach disk.
    pub(crate) async fn finish(mut self) -> ViewSnapshot {
        self.store.flush().await;
        while let Ok(event) = self.events.try_recv() {
            let scope = event.scope();
            match &event {
                PersistenceEvent::SaveFailed { message, .. } => {
                    eprintln!(
                        "{} view preferences for '{}' were not saved: {}",
                        "Warning:".if_supports_color(Stream::Stderr, |t| t.yellow()),
                        scope,
                        message
                    );
                }
                PersistenceEvent::LoadFailed { message, .. } => {
                    eprintln!(
                        "{} using defaults for '{}', stored preferences could not be read: {}",
                        "Warning:".if_supports_color(Stream::Stderr, |t| t.yellow()),
                        scope,
                        message
                    );
                }
                PersistenceEvent::Saved { .. } => {}
            }
        }
        self.store.snapshot()
    }
}

/// `key: value` line with the key dimmed
pub(crate) fn field_line(key: &str, value: impl std::fmt::Display) -> String {
    format!(
        "{} {}",
        format!("{key}:").if_supports_color(Stream::Stdout, |t| t.dimmed()),
        value
    )
}
