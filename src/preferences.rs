//! The persisted per-workspace view bundle.

use serde::{Deserialize, Serialize};

use crate::filter::IssueFilters;
use crate::properties::DisplayProperties;
use crate::types::{GroupBy, OrderBy, ViewType};

fn default_show_empty_groups() -> bool {
    true
}

/// Everything the view options panel reads and writes for one workspace.
///
/// Storage keeps every field regardless of the active view; which fields
/// are presented is decided by [`crate::rules`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewPreferences {
    #[serde(default)]
    pub view: ViewType,

    #[serde(default)]
    pub group_by: GroupBy,

    #[serde(default)]
    pub order_by: OrderBy,

    #[serde(default = "default_show_empty_groups")]
    pub show_empty_groups: bool,

    #[serde(default)]
    pub properties: DisplayProperties,

    #[serde(default)]
    pub filters: IssueFilters,
}

impl Default for ViewPreferences {
    fn default() -> Self {
        ViewPreferences {
            view: ViewType::default(),
            group_by: GroupBy::default(),
            order_by: OrderBy::default(),
            show_empty_groups: default_show_empty_groups(),
            properties: DisplayProperties::default(),
            filters: IssueFilters::default(),
        }
    }
}

impl ViewPreferences {
    /// Query parameters for the issue list endpoint.
    ///
    /// Filters come first, then `order_by`, then `group_by` unless issues are
    /// ungrouped.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = self.filters.query_params();
        params.push(("order_by".to_string(), self.order_by.to_string()));
        if self.group_by != GroupBy::NoGrouping {
            params.push(("group_by".to_string(), self.group_by.to_string()));
        }
        params
    }

    /// `query_params` form-encoded into a query string.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_params())
            .finish()
    }
}
