use owo_colors::{OwoColorize, Stream};
use serde_json::json;

use super::{CommandOutput, Session};
use crate::capabilities::CapabilityFlags;
use crate::config::Config;
use crate::controller::UiEvent;
use crate::error::Result;
use crate::preferences::ViewPreferences;
use crate::properties::PropertyName;
use crate::types::WorkspaceSlug;

/// Send one event through the controller and report the field before and after.
async fn apply_event(
    workspace: &str,
    field: &str,
    event: UiEvent,
    read: impl Fn(&ViewPreferences) -> String,
    output_json: bool,
) -> Result<()> {
    let mut session = Session::open(workspace).await?;
    let previous = read(session.store().state());
    session.controller().handle(event)?;
    let snapshot = session.finish().await;
    let value = read(&snapshot.preferences);

    let text = if previous == value {
        format!("{field} for {workspace} is already {value}")
    } else {
        format!(
            "Updated {field} for {}: {} -> {}",
            workspace.if_supports_color(Stream::Stdout, |t| t.cyan()),
            previous.if_supports_color(Stream::Stdout, |t| t.dimmed()),
            value.if_supports_color(Stream::Stdout, |t| t.green()),
        )
    };

    CommandOutput::new(json!({
        "workspace": workspace,
        "field": field,
        "previous": previous,
        "value": value,
    }))
    .with_text(text)
    .print(output_json)
}

fn on_off(value: bool) -> String {
    let text = if value { "on" } else { "off" };
    text.to_string()
}

/// Switch the view type
pub async fn cmd_view(workspace: &str, value: &str, output_json: bool) -> Result<()> {
    apply_event(
        workspace,
        "view",
        UiEvent::ViewSelected(value.to_string()),
        |p| p.view.to_string(),
        output_json,
    )
    .await
}

/// Set the grouping key
pub async fn cmd_group_by(workspace: &str, value: &str, output_json: bool) -> Result<()> {
    apply_event(
        workspace,
        "group_by",
        UiEvent::GroupBySelected(value.to_string()),
        |p| p.group_by.to_string(),
        output_json,
    )
    .await
}

/// Set the ordering key
pub async fn cmd_order_by(workspace: &str, value: &str, output_json: bool) -> Result<()> {
    apply_event(
        workspace,
        "order_by",
        UiEvent::OrderBySelected(value.to_string()),
        |p| p.order_by.to_string(),
        output_json,
    )
    .await
}

/// Set the issue type filter
pub async fn cmd_issue_type(workspace: &str, value: &str, output_json: bool) -> Result<()> {
    apply_event(
        workspace,
        "type",
        UiEvent::IssueTypeSelected(value.to_string()),
        |p| {
            p.filters
                .issue_type()
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string())
        },
        output_json,
    )
    .await
}

/// Show or hide empty groups
pub async fn cmd_empty_groups(workspace: &str, show: bool, output_json: bool) -> Result<()> {
    apply_event(
        workspace,
        "show_empty_groups",
        UiEvent::EmptyGroupsToggled(show),
        |p| on_off(p.show_empty_groups),
        output_json,
    )
    .await
}

/// Toggle a display property
pub async fn cmd_property(workspace: &str, name: &str, output_json: bool) -> Result<()> {
    let property: PropertyName = name.parse()?;
    apply_event(
        workspace,
        property.as_str(),
        UiEvent::PropertyClicked(property.to_string()),
        |p| {
            if p.properties.get(property) {
                "visible".to_string()
            } else {
                "hidden".to_string()
            }
        },
        output_json,
    )
    .await
}

/// Turn the estimate feature on or off for a workspace
pub async fn cmd_estimates(workspace: &str, active: bool, output_json: bool) -> Result<()> {
    let scope = WorkspaceSlug::new(workspace)?;
    let mut config = Config::load()?;
    let previous = config.is_estimate_active(&scope);
    config.set_estimates(&scope, active);
    config.save()?;

    CommandOutput::new(json!({
        "workspace": workspace,
        "field": "estimates",
        "previous": on_off(previous),
        "value": on_off(active),
    }))
    .with_text(format!(
        "Estimates for {}: {}",
        workspace.if_supports_color(Stream::Stdout, |t| t.cyan()),
        on_off(active)
    ))
    .print(output_json)
}
