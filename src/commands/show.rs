use owo_colors::{OwoColorize, Stream};
use serde_json::json;

use super::{CommandOutput, Session, field_line};
use crate::capabilities::CapabilityFlags;
use crate::controller::{Menu, MenuOption, ViewOptionsModel};
use crate::error::Result;
use crate::filter::{FilterKey, FilterValue};
use crate::preferences::ViewPreferences;

/// Show the stored view preferences for a workspace
pub async fn cmd_show(workspace: &str, output_json: bool) -> Result<()> {
    let session = Session::open(workspace).await?;
    let estimates_active = session
        .store()
        .scope()
        .is_some_and(|scope| session.config().is_estimate_active(scope));
    let snapshot = session.finish().await;

    let mut text = vec![field_line(
        "workspace",
        workspace.if_supports_color(Stream::Stdout, |t| t.cyan()),
    )];
    text.extend(format_preferences(&snapshot.preferences));
    text.push(field_line(
        "estimates",
        if estimates_active { "active" } else { "inactive" },
    ));

    let mut json = serde_json::to_value(&snapshot)?;
    json["estimates_active"] = json!(estimates_active);

    CommandOutput::new(json)
        .with_text(text.join("\n"))
        .print(output_json)
}

/// List the options presented for the workspace's current view
pub async fn cmd_options(workspace: &str, output_json: bool) -> Result<()> {
    let mut session = Session::open(workspace).await?;
    let model = session.controller().render();
    session.finish().await;

    CommandOutput::new(serde_json::to_value(&model)?)
        .with_text(format_options(&model))
        .print(output_json)
}

/// Print the issue list query string for a workspace
pub async fn cmd_query(workspace: &str, output_json: bool) -> Result<()> {
    let session = Session::open(workspace).await?;
    let snapshot = session.finish().await;
    let preferences = &snapshot.preferences;

    let params: serde_json::Map<String, serde_json::Value> = preferences
        .query_params()
        .into_iter()
        .map(|(key, value)| (key, json!(value)))
        .collect();
    let query = preferences.to_query_string();

    CommandOutput::new(json!({
        "workspace": workspace,
        "query": query,
        "params": params,
    }))
    .with_text(query)
    .print(output_json)
}

pub(super) fn format_preferences(preferences: &ViewPreferences) -> Vec<String> {
    let mut lines = vec![
        field_line("view", preferences.view),
        field_line("group_by", preferences.group_by),
        field_line("order_by", preferences.order_by),
        field_line(
            "show_empty_groups",
            if preferences.show_empty_groups {
                "on"
            } else {
                "off"
            },
        ),
    ];

    let hidden: Vec<&str> = preferences
        .properties
        .iter()
        .filter(|(_, visible)| !visible)
        .map(|(name, _)| name.as_str())
        .collect();
    lines.push(field_line(
        "hidden_properties",
        if hidden.is_empty() {
            "-".to_string()
        } else {
            hidden.join(", ")
        },
    ));

    let filters: Vec<String> = FilterKey::ALL
        .iter()
        .filter_map(|key| {
            let value = match preferences.filters.get(*key)? {
                FilterValue::Scalar(value) => value,
                FilterValue::List(values) => values.join(", "),
            };
            Some(format!("  {key}: {value}"))
        })
        .collect();
    if filters.is_empty() {
        lines.push(field_line("filters", "-"));
    } else {
        lines.push(field_line("filters", "").trim_end().to_string());
        lines.extend(filters);
    }
    lines
}

fn format_choice(option: &MenuOption) -> String {
    if option.selected {
        format!("*{}", option.key)
            .if_supports_color(Stream::Stdout, |t| t.green())
            .to_string()
    } else {
        option.key.clone()
    }
}

fn format_menu(title: &str, menu: &Menu) -> String {
    let choices: Vec<String> = menu.options.iter().map(format_choice).collect();
    format!("{title} ({}): {}", menu.label, choices.join(" "))
}

/// Plain-text rendering of a view options model.
///
/// Selected entries are prefixed with `*`. Controls the view does not offer
/// are left out.
pub(super) fn format_options(model: &ViewOptionsModel) -> String {
    let views: Vec<String> = model.views.iter().map(format_choice).collect();
    let mut lines = vec![format!("Views: {}", views.join(" "))];

    if let Some(menu) = &model.group_by {
        lines.push(format_menu("Group by", menu));
    }
    if let Some(menu) = &model.order_by {
        lines.push(format_menu("Order by", menu));
    }
    lines.push(format_menu("Issue type", &model.issue_type));
    if let Some(show) = model.show_empty_groups {
        lines.push(format!(
            "Show empty groups: {}",
            if show { "on" } else { "off" }
        ));
    }

    lines.push("Properties:".to_string());
    for chip in &model.properties {
        let mark = if chip.visible { "[x]" } else { "[ ]" };
        lines.push(format!("  {mark} {} ({})", chip.name, chip.label));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::PropertyChip;
    use crate::properties::PropertyName;

    fn option(key: &str, selected: bool) -> MenuOption {
        MenuOption {
            key: key.to_string(),
            label: key.to_string(),
            selected,
        }
    }

    #[test]
    fn test_format_options_without_layout_controls() {
        let model = ViewOptionsModel {
            views: vec![option("list", false), option("calendar", true)],
            group_by: None,
            order_by: None,
            issue_type: Menu {
                label: "Select".to_string(),
                options: vec![option("all", false), option("active", false)],
            },
            show_empty_groups: None,
            properties: vec![PropertyChip {
                name: PropertyName::Key,
                label: "ID".to_string(),
                visible: false,
            }],
        };

        let text = format_options(&model);
        assert!(!text.contains("Group by"));
        assert!(!text.contains("Order by"));
        assert!(!text.contains("Show empty groups"));
        assert!(text.contains("Issue type (Select): all active"));
        assert!(text.contains("[ ] key (ID)"));
    }

    #[test]
    fn test_format_preferences_lists_hidden_properties() {
        let mut preferences = ViewPreferences::default();
        preferences.properties.toggle(PropertyName::DueDate);

        let lines = format_preferences(&preferences);
        assert!(lines.iter().any(|l| l.ends_with("due_date")));
        assert!(lines.iter().any(|l| l.ends_with("-")));
    }
}
