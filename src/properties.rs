//! Display property toggles.
//!
//! `DisplayProperties` keeps one boolean per known property. Unknown keys are
//! rejected on deserialisation and missing keys default to visible, so every
//! persisted bundle maps onto the full property domain.

use serde::{Deserialize, Serialize};

use crate::error::VistaError;
use crate::utils::humanize_snake_case;

/// An issue attribute that can be shown or hidden on each row or card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyName {
    Assignee,
    StartDate,
    DueDate,
    Key,
    Labels,
    Priority,
    State,
    SubIssueCount,
    Link,
    AttachmentCount,
    Estimate,
    CreatedOn,
    UpdatedOn,
}

impl PropertyName {
    /// Catalogue in presentation order.
    pub const ALL: [PropertyName; 13] = [
        PropertyName::Assignee,
        PropertyName::StartDate,
        PropertyName::DueDate,
        PropertyName::Key,
        PropertyName::Labels,
        PropertyName::Priority,
        PropertyName::State,
        PropertyName::SubIssueCount,
        PropertyName::Link,
        PropertyName::AttachmentCount,
        PropertyName::Estimate,
        PropertyName::CreatedOn,
        PropertyName::UpdatedOn,
    ];

    pub fn label(&self) -> String {
        match self {
            PropertyName::Key => "ID".to_string(),
            other => humanize_snake_case(other.as_str()),
        }
    }
}

enum_display_fromstr!(PropertyName, VistaError::invalid_property, {
    Assignee => "assignee",
    StartDate => "start_date",
    DueDate => "due_date",
    Key => "key",
    Labels => "labels",
    Priority => "priority",
    State => "state",
    SubIssueCount => "sub_issue_count",
    Link => "link",
    AttachmentCount => "attachment_count",
    Estimate => "estimate",
    CreatedOn => "created_on",
    UpdatedOn => "updated_on",
});

fn visible() -> bool {
    true
}

/// Visibility flag for every display property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayProperties {
    #[serde(default = "visible")]
    assignee: bool,
    #[serde(default = "visible")]
    start_date: bool,
    #[serde(default = "visible")]
    due_date: bool,
    #[serde(default = "visible")]
    key: bool,
    #[serde(default = "visible")]
    labels: bool,
    #[serde(default = "visible")]
    priority: bool,
    #[serde(default = "visible")]
    state: bool,
    #[serde(default = "visible")]
    sub_issue_count: bool,
    #[serde(default = "visible")]
    link: bool,
    #[serde(default = "visible")]
    attachment_count: bool,
    #[serde(default = "visible")]
    estimate: bool,
    #[serde(default = "visible")]
    created_on: bool,
    #[serde(default = "visible")]
    updated_on: bool,
}

impl Default for DisplayProperties {
    fn default() -> Self {
        Self::all(true)
    }
}

impl DisplayProperties {
    /// Every property set to `value`.
    pub fn all(value: bool) -> Self {
        DisplayProperties {
            assignee: value,
            start_date: value,
            due_date: value,
            key: value,
            labels: value,
            priority: value,
            state: value,
            sub_issue_count: value,
            link: value,
            attachment_count: value,
            estimate: value,
            created_on: value,
            updated_on: value,
        }
    }

    pub fn get(&self, name: PropertyName) -> bool {
        match name {
            PropertyName::Assignee => self.assignee,
            PropertyName::StartDate => self.start_date,
            PropertyName::DueDate => self.due_date,
            PropertyName::Key => self.key,
            PropertyName::Labels => self.labels,
            PropertyName::Priority => self.priority,
            PropertyName::State => self.state,
            PropertyName::SubIssueCount => self.sub_issue_count,
            PropertyName::Link => self.link,
            PropertyName::AttachmentCount => self.attachment_count,
            PropertyName::Estimate => self.estimate,
            PropertyName::CreatedOn => self.created_on,
            PropertyName::UpdatedOn => self.updated_on,
        }
    }

    fn slot_mut(&mut self, name: PropertyName) -> &mut bool {
        match name {
            PropertyName::Assignee => &mut self.assignee,
            PropertyName::StartDate => &mut self.start_date,
            PropertyName::DueDate => &mut self.due_date,
            PropertyName::Key => &mut self.key,
            PropertyName::Labels => &mut self.labels,
            PropertyName::Priority => &mut self.priority,
            PropertyName::State => &mut self.state,
            PropertyName::SubIssueCount => &mut self.sub_issue_count,
            PropertyName::Link => &mut self.link,
            PropertyName::AttachmentCount => &mut self.attachment_count,
            PropertyName::Estimate => &mut self.estimate,
            PropertyName::CreatedOn => &mut self.created_on,
            PropertyName::UpdatedOn => &mut self.updated_on,
        }
    }

    /// Flip the flag for `name` and return the new value.
    pub fn toggle(&mut self, name: PropertyName) -> bool {
        let slot = self.slot_mut(name);
        *slot = !*slot;
        *slot
    }

    /// All properties with their flags, in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyName, bool)> + '_ {
        PropertyName::ALL.into_iter().map(|name| (name, self.get(name)))
    }
}
