//! Which options are presentable for a view type.
//!
//! These functions only decide presentation. Stored preferences keep every
//! field regardless of the view; a grouping chosen in list view survives a
//! switch to calendar view and reappears when switching back.

use crate::properties::PropertyName;
use crate::types::{GroupBy, OrderBy, ViewType};

/// Calendar and spreadsheet views impose their own layout and hide the
/// grouping, ordering and empty-group controls entirely.
pub fn shows_layout_controls(view: ViewType) -> bool {
    !matches!(view, ViewType::Calendar | ViewType::Spreadsheet)
}

/// Groupings that are never offered, whatever the view.
fn is_reserved_grouping(key: GroupBy) -> bool {
    matches!(key, GroupBy::State | GroupBy::CreatedBy | GroupBy::Assignees)
}

/// Grouping keys offered for `view`, in catalogue order.
pub fn allowed_group_by(view: ViewType) -> Vec<GroupBy> {
    if !shows_layout_controls(view) {
        return Vec::new();
    }
    GroupBy::ALL
        .into_iter()
        .filter(|key| !is_reserved_grouping(*key))
        .filter(|key| !(view == ViewType::Kanban && *key == GroupBy::NoGrouping))
        .collect()
}

/// Ordering keys offered for `view` under the active grouping.
///
/// Manual order is never user-selectable, and ordering by priority is
/// redundant when issues are already grouped by priority.
pub fn allowed_order_by(view: ViewType, group_by: GroupBy) -> Vec<OrderBy> {
    if !shows_layout_controls(view) {
        return Vec::new();
    }
    OrderBy::ALL
        .into_iter()
        .filter(|key| *key != OrderBy::Manual)
        .filter(|key| !(group_by == GroupBy::Priority && *key == OrderBy::Priority))
        .collect()
}

/// Display properties offered for `view`.
///
/// `estimates_active` is the workspace capability flag for the estimate
/// feature.
pub fn allowed_properties(view: ViewType, estimates_active: bool) -> Vec<PropertyName> {
    let spreadsheet = view == ViewType::Spreadsheet;
    PropertyName::ALL
        .into_iter()
        .filter(|name| match name {
            PropertyName::Estimate => estimates_active,
            PropertyName::AttachmentCount | PropertyName::Link | PropertyName::SubIssueCount => {
                !spreadsheet
            }
            PropertyName::CreatedOn | PropertyName::UpdatedOn => spreadsheet,
            _ => true,
        })
        .collect()
}
