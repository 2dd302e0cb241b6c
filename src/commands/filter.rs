use owo_colors::{OwoColorize, Stream};
use serde_json::json;

use super::{CommandOutput, Session};
use crate::controller::UiEvent;
use crate::error::Result;
use crate::filter::{FilterKey, FilterKind, FilterValue};

/// Build the value a surface would send for `values`.
///
/// Date keys always carry the whole set. Other keys take a single scalar, so
/// several values become one selection each.
fn selections(key: FilterKey, values: &[String]) -> Vec<FilterValue> {
    match key.kind() {
        FilterKind::DateSet => vec![FilterValue::List(values.to_vec())],
        FilterKind::Single | FilterKind::MultiSelect => {
            values.iter().map(FilterValue::scalar).collect()
        }
    }
}

/// Select filter values for a workspace
pub async fn cmd_filter(
    workspace: &str,
    key: &str,
    values: &[String],
    output_json: bool,
) -> Result<()> {
    let filter_key: FilterKey = key.parse()?;
    let mut session = Session::open(workspace).await?;

    // Selections applied before a rejected one are still saved.
    let applied = selections(filter_key, values).into_iter().try_for_each(|value| {
        session.controller().handle(UiEvent::FilterSelected {
            key: filter_key.to_string(),
            value,
        })
    });
    let snapshot = session.finish().await;
    applied?;
    let current = snapshot.preferences.filters.get(filter_key);

    let text = match &current {
        None => format!(
            "Cleared {filter_key} filter for {}",
            workspace.if_supports_color(Stream::Stdout, |t| t.cyan())
        ),
        Some(FilterValue::Scalar(value)) => format!(
            "{filter_key} filter for {}: {}",
            workspace.if_supports_color(Stream::Stdout, |t| t.cyan()),
            value.if_supports_color(Stream::Stdout, |t| t.green())
        ),
        Some(FilterValue::List(values)) => format!(
            "{filter_key} filter for {}: {}",
            workspace.if_supports_color(Stream::Stdout, |t| t.cyan()),
            values
                .join(", ")
                .if_supports_color(Stream::Stdout, |t| t.green())
        ),
    };

    CommandOutput::new(json!({
        "workspace": workspace,
        "key": filter_key.to_string(),
        "value": current,
    }))
    .with_text(text)
    .print(output_json)
}

/// Reset every filter of a workspace
pub async fn cmd_clear_filters(workspace: &str, output_json: bool) -> Result<()> {
    let mut session = Session::open(workspace).await?;
    session.controller().handle(UiEvent::FiltersCleared)?;
    let snapshot = session.finish().await;

    CommandOutput::new(json!({
        "workspace": workspace,
        "filters": snapshot.preferences.filters,
    }))
    .with_text(format!(
        "Cleared all filters for {}",
        workspace.if_supports_color(Stream::Stdout, |t| t.cyan())
    ))
    .print(output_json)
}
