//! What the rendering surface receives from the controller.

use serde::Serialize;

use crate::properties::PropertyName;

/// One entry of a menu or button row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuOption {
    pub key: String,
    pub label: String,
    pub selected: bool,
}

/// A dropdown with the label of its current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    pub label: String,
    pub options: Vec<MenuOption>,
}

impl Menu {
    pub fn keys(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.key.as_str()).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.options.iter().any(|o| o.key == key)
    }
}

/// A display property chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyChip {
    pub name: PropertyName,
    pub label: String,
    pub visible: bool,
}

/// The full option set presented for the current view.
///
/// `group_by`, `order_by` and `show_empty_groups` are `None` when the view
/// hides those controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewOptionsModel {
    pub views: Vec<MenuOption>,
    pub group_by: Option<Menu>,
    pub order_by: Option<Menu>,
    pub issue_type: Menu,
    pub show_empty_groups: Option<bool>,
    pub properties: Vec<PropertyChip>,
}

impl ViewOptionsModel {
    pub fn has_property(&self, name: PropertyName) -> bool {
        self.properties.iter().any(|chip| chip.name == name)
    }
}
