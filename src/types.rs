use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VistaError};

/// Identifier partitioning all view state by workspace.
///
/// Slugs end up as file names in the file-backed preference store, so only
/// ASCII alphanumerics, `-` and `_` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkspaceSlug(String);

impl WorkspaceSlug {
    pub fn new(slug: impl Into<String>) -> Result<Self> {
        let slug = slug.into();
        let valid = !slug.is_empty()
            && slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(VistaError::InvalidWorkspace(slug));
        }
        Ok(WorkspaceSlug(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for WorkspaceSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for WorkspaceSlug {
    type Error = VistaError;

    fn try_from(value: String) -> Result<Self> {
        WorkspaceSlug::new(value)
    }
}

impl From<WorkspaceSlug> for String {
    fn from(slug: WorkspaceSlug) -> Self {
        slug.0
    }
}

/// Layout mode through which issues are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    #[default]
    List,
    Kanban,
    Calendar,
    Spreadsheet,
    Gantt,
}

impl ViewType {
    pub const ALL: [ViewType; 5] = [
        ViewType::List,
        ViewType::Kanban,
        ViewType::Calendar,
        ViewType::Spreadsheet,
        ViewType::Gantt,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ViewType::List => "List View",
            ViewType::Kanban => "Kanban View",
            ViewType::Calendar => "Calendar View",
            ViewType::Spreadsheet => "Spreadsheet View",
            ViewType::Gantt => "Gantt View",
        }
    }
}

enum_display_fromstr!(ViewType, VistaError::invalid_view_type, {
    List => "list",
    Kanban => "kanban",
    Calendar => "calendar",
    Spreadsheet => "spreadsheet",
    Gantt => "gantt",
});

/// Attribute used to bucket issues into sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum GroupBy {
    #[serde(rename = "state")]
    State,
    #[serde(rename = "state_detail.group")]
    StateGroup,
    #[serde(rename = "priority")]
    Priority,
    #[serde(rename = "project")]
    Project,
    #[serde(rename = "labels")]
    Labels,
    #[serde(rename = "assignees")]
    Assignees,
    #[serde(rename = "created_by")]
    CreatedBy,
    /// No grouping; issues render as a single bucket.
    #[default]
    #[serde(rename = "none")]
    NoGrouping,
}

impl GroupBy {
    /// Catalogue in presentation order.
    pub const ALL: [GroupBy; 8] = [
        GroupBy::State,
        GroupBy::StateGroup,
        GroupBy::Priority,
        GroupBy::Project,
        GroupBy::Labels,
        GroupBy::Assignees,
        GroupBy::CreatedBy,
        GroupBy::NoGrouping,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GroupBy::State => "States",
            GroupBy::StateGroup => "State Groups",
            GroupBy::Priority => "Priority",
            GroupBy::Project => "Project",
            GroupBy::Labels => "Labels",
            GroupBy::Assignees => "Assignees",
            GroupBy::CreatedBy => "Created By",
            GroupBy::NoGrouping => "None",
        }
    }
}

enum_display_fromstr!(GroupBy, VistaError::invalid_group_by, {
    State => "state",
    StateGroup => "state_detail.group",
    Priority => "priority",
    Project => "project",
    Labels => "labels",
    Assignees => "assignees",
    CreatedBy => "created_by",
    NoGrouping => "none",
});

/// Attribute used to sort issues within a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum OrderBy {
    /// Manual drag-and-drop order.
    #[serde(rename = "sort_order")]
    Manual,
    #[default]
    #[serde(rename = "-created_at")]
    LastCreated,
    #[serde(rename = "-updated_at")]
    LastUpdated,
    #[serde(rename = "start_date")]
    StartDate,
    #[serde(rename = "priority")]
    Priority,
}

impl OrderBy {
    pub const ALL: [OrderBy; 5] = [
        OrderBy::Manual,
        OrderBy::LastCreated,
        OrderBy::LastUpdated,
        OrderBy::StartDate,
        OrderBy::Priority,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OrderBy::Manual => "Manual",
            OrderBy::LastCreated => "Last created",
            OrderBy::LastUpdated => "Last updated",
            OrderBy::StartDate => "Start date",
            OrderBy::Priority => "Priority",
        }
    }
}

enum_display_fromstr!(OrderBy, VistaError::invalid_order_by, {
    Manual => "sort_order",
    LastCreated => "-created_at",
    LastUpdated => "-updated_at",
    StartDate => "start_date",
    Priority => "priority",
});

/// Value of the single-valued `type` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IssueTypeFilter {
    #[default]
    All,
    Active,
    Backlog,
}

impl IssueTypeFilter {
    pub const ALL: [IssueTypeFilter; 3] = [
        IssueTypeFilter::All,
        IssueTypeFilter::Active,
        IssueTypeFilter::Backlog,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IssueTypeFilter::All => "All Issues",
            IssueTypeFilter::Active => "Active Issues",
            IssueTypeFilter::Backlog => "Backlog Issues",
        }
    }
}

enum_display_fromstr!(IssueTypeFilter, VistaError::invalid_issue_type, {
    All => "all",
    Active => "active",
    Backlog => "backlog",
});

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_workspace_slug_validation() {
        assert!(WorkspaceSlug::new("acme").is_ok());
        assert!(WorkspaceSlug::new("acme-labs_2").is_ok());
        assert!(WorkspaceSlug::new("").is_err());
        assert!(WorkspaceSlug::new("../etc").is_err());
        assert!(WorkspaceSlug::new("a b").is_err());
    }

    #[test]
    fn test_workspace_slug_deserialize_validates() {
        let ok: WorkspaceSlug = serde_json::from_str("\"acme\"").unwrap();
        assert_eq!(ok.as_str(), "acme");
        assert!(serde_json::from_str::<WorkspaceSlug>("\"a/b\"").is_err());
    }

    #[test]
    fn test_group_by_wire_names_match_serde() {
        for key in GroupBy::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key));
            assert_eq!(GroupBy::from_str(key.as_str()).unwrap(), key);
        }
    }

    #[test]
    fn test_order_by_wire_names_match_serde() {
        for key in OrderBy::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key));
        }
        assert_eq!(OrderBy::from_str("-created_at").unwrap(), OrderBy::LastCreated);
    }

    #[test]
    fn test_view_type_from_str() {
        assert_eq!(ViewType::from_str("Kanban").unwrap(), ViewType::Kanban);
        assert!(ViewType::from_str("gantt_chart").is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ViewType::default(), ViewType::List);
        assert_eq!(GroupBy::default(), GroupBy::NoGrouping);
        assert_eq!(OrderBy::default(), OrderBy::LastCreated);
        assert_eq!(IssueTypeFilter::default(), IssueTypeFilter::All);
    }
}
