//! Issue filter predicates.
//!
//! `IssueFilters` is a fixed-shape record with one slot per `FilterKey`.
//! `None` in a slot means no constraint for that key. All reads and writes
//! by key go through exhaustive matches, so adding a key is a compile error
//! until every accessor handles it.

pub mod date;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VistaError};
use crate::types::IssueTypeFilter;
use crate::utils::{has_duplicates, same_elements, toggle_value};

pub use date::{DateBound, DateFilterEntry};

/// A filterable issue attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    #[serde(rename = "type")]
    Type,
    Priority,
    State,
    StateGroup,
    Assignees,
    CreatedBy,
    Labels,
    Subscriber,
    StartDate,
    TargetDate,
}

enum_display_fromstr!(FilterKey, VistaError::invalid_filter_key, {
    Type => "type",
    Priority => "priority",
    State => "state",
    StateGroup => "state_group",
    Assignees => "assignees",
    CreatedBy => "created_by",
    Labels => "labels",
    Subscriber => "subscriber",
    StartDate => "start_date",
    TargetDate => "target_date",
});

/// How a key reacts to a new selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Selection replaces the stored scalar.
    Single,
    /// Selection replaces the stored set, or clears it when the sets match.
    DateSet,
    /// Selection toggles one value in the stored collection.
    MultiSelect,
}

impl FilterKey {
    pub const ALL: [FilterKey; 10] = [
        FilterKey::Type,
        FilterKey::Priority,
        FilterKey::State,
        FilterKey::StateGroup,
        FilterKey::Assignees,
        FilterKey::CreatedBy,
        FilterKey::Labels,
        FilterKey::Subscriber,
        FilterKey::StartDate,
        FilterKey::TargetDate,
    ];

    pub fn kind(&self) -> FilterKind {
        match self {
            FilterKey::Type => FilterKind::Single,
            FilterKey::StartDate | FilterKey::TargetDate => FilterKind::DateSet,
            FilterKey::Priority
            | FilterKey::State
            | FilterKey::StateGroup
            | FilterKey::Assignees
            | FilterKey::CreatedBy
            | FilterKey::Labels
            | FilterKey::Subscriber => FilterKind::MultiSelect,
        }
    }
}

/// A filter value: one scalar, or an ordered list of scalars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(String),
    List(Vec<String>),
}

impl FilterValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        FilterValue::Scalar(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// The active filter predicates for one workspace scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IssueFilters {
    #[serde(rename = "type")]
    issue_type: Option<IssueTypeFilter>,
    priority: Option<Vec<String>>,
    state: Option<Vec<String>>,
    state_group: Option<Vec<String>>,
    assignees: Option<Vec<String>>,
    created_by: Option<Vec<String>>,
    labels: Option<Vec<String>>,
    subscriber: Option<Vec<String>>,
    start_date: Option<Vec<String>>,
    target_date: Option<Vec<String>>,
}

impl IssueFilters {
    pub fn issue_type(&self) -> Option<IssueTypeFilter> {
        self.issue_type
    }

    /// The stored collection for a list-valued key, `None` when unconstrained
    /// or when `key` is single-valued.
    pub fn list(&self, key: FilterKey) -> Option<&[String]> {
        let slot = match key {
            FilterKey::Type => return None,
            FilterKey::Priority => &self.priority,
            FilterKey::State => &self.state,
            FilterKey::StateGroup => &self.state_group,
            FilterKey::Assignees => &self.assignees,
            FilterKey::CreatedBy => &self.created_by,
            FilterKey::Labels => &self.labels,
            FilterKey::Subscriber => &self.subscriber,
            FilterKey::StartDate => &self.start_date,
            FilterKey::TargetDate => &self.target_date,
        };
        slot.as_deref()
    }

    fn list_slot(&mut self, key: FilterKey) -> Option<&mut Option<Vec<String>>> {
        match key {
            FilterKey::Type => None,
            FilterKey::Priority => Some(&mut self.priority),
            FilterKey::State => Some(&mut self.state),
            FilterKey::StateGroup => Some(&mut self.state_group),
            FilterKey::Assignees => Some(&mut self.assignees),
            FilterKey::CreatedBy => Some(&mut self.created_by),
            FilterKey::Labels => Some(&mut self.labels),
            FilterKey::Subscriber => Some(&mut self.subscriber),
            FilterKey::StartDate => Some(&mut self.start_date),
            FilterKey::TargetDate => Some(&mut self.target_date),
        }
    }

    /// Current value for `key`, `None` when unconstrained.
    pub fn get(&self, key: FilterKey) -> Option<FilterValue> {
        match key {
            FilterKey::Type => self
                .issue_type
                .map(|t| FilterValue::Scalar(t.as_str().to_string())),
            _ => self.list(key).map(|values| FilterValue::List(values.to_vec())),
        }
    }

    /// Apply a user selection to `key`.
    ///
    /// - `type` takes a scalar and replaces the stored value.
    /// - `start_date`/`target_date` take a list: identical sets (ignoring
    ///   order and the case of the bound) clear the filter, anything else
    ///   replaces it.
    /// - Every other key takes a scalar that is toggled in or out of the
    ///   stored collection.
    ///
    /// Invalid input leaves the filters unchanged.
    pub fn select(&mut self, key: FilterKey, value: FilterValue) -> Result<()> {
        match key.kind() {
            FilterKind::Single => self.assign(key, Some(value)),
            FilterKind::DateSet => {
                let FilterValue::List(values) = value else {
                    return Err(VistaError::filter_value(key, "expected a list of date entries"));
                };
                let values = canonical_dates(key, values)?;
                let current = self.list(key).unwrap_or_default();
                let next = if same_elements(current, &values) {
                    None
                } else {
                    Some(FilterValue::List(values))
                };
                self.assign(key, next)
            }
            FilterKind::MultiSelect => {
                let FilterValue::Scalar(value) = value else {
                    return Err(VistaError::filter_value(key, "expected a single value to toggle"));
                };
                let current = self.list(key).unwrap_or_default();
                let toggled = toggle_value(current, &value);
                self.assign(key, Some(FilterValue::List(toggled)))
            }
        }
    }

    /// Store `value` for `key` after validating its shape. Date entries are
    /// kept in canonical form.
    ///
    /// `None` and empty lists clear the key.
    pub fn assign(&mut self, key: FilterKey, value: Option<FilterValue>) -> Result<()> {
        match key {
            FilterKey::Type => {
                self.issue_type = match value {
                    None => None,
                    Some(FilterValue::Scalar(raw)) => Some(IssueTypeFilter::from_str(&raw)?),
                    Some(FilterValue::List(_)) => {
                        return Err(VistaError::filter_value(key, "expected a single issue type"));
                    }
                };
                Ok(())
            }
            _ => {
                let values = match value {
                    None => None,
                    Some(FilterValue::Scalar(_)) if key.kind() == FilterKind::DateSet => {
                        return Err(VistaError::filter_value(key, "expected a list of date entries"));
                    }
                    Some(FilterValue::Scalar(raw)) => Some(vec![raw]),
                    Some(FilterValue::List(values)) => Some(values),
                };
                let values = match values {
                    Some(values) if !values.is_empty() => Some(validate_list(key, values)?),
                    _ => None,
                };
                if let Some(slot) = self.list_slot(key) {
                    *slot = values;
                }
                Ok(())
            }
        }
    }

    /// Put every stored list through the checks a selection gets.
    ///
    /// Used for filters that arrive from storage rather than from a
    /// selection. Empty lists become unconstrained.
    pub fn validated(mut self) -> Result<Self> {
        for key in FilterKey::ALL {
            if let Some(slot) = self.list_slot(key) {
                let values = slot.take();
                self.assign(key, values.map(FilterValue::List))?;
            }
        }
        Ok(self)
    }

    /// Reset every key to unconstrained.
    pub fn clear(&mut self) {
        *self = IssueFilters::default();
    }

    pub fn is_empty(&self) -> bool {
        FilterKey::ALL.iter().all(|key| self.get(*key).is_none())
    }

    /// Query parameters for the issue list endpoint, one per constrained key.
    ///
    /// List values are comma-joined. `type=all` is omitted since it does not
    /// constrain anything.
    pub fn query_params(&self) -> Vec<(String, String)> {
        FilterKey::ALL
            .iter()
            .filter_map(|key| {
                let value = match self.get(*key)? {
                    FilterValue::Scalar(value) => value,
                    FilterValue::List(values) => values.join(","),
                };
                if *key == FilterKey::Type && value == IssueTypeFilter::All.as_str() {
                    return None;
                }
                Some((key.to_string(), value))
            })
            .collect()
    }
}

/// Rewrite date entries in their canonical `YYYY-MM-DD;after|before` form.
///
/// Entries that differ only in case or spacing compare equal afterwards.
pub(crate) fn canonical_dates(key: FilterKey, values: Vec<String>) -> Result<Vec<String>> {
    values
        .iter()
        .map(|value| {
            value
                .parse::<DateFilterEntry>()
                .map(|entry| entry.to_string())
                .map_err(|reason| VistaError::filter_value(key, reason))
        })
        .collect()
}

fn validate_list(key: FilterKey, values: Vec<String>) -> Result<Vec<String>> {
    let values = if key.kind() == FilterKind::DateSet {
        canonical_dates(key, values)?
    } else {
        values
    };
    if has_duplicates(&values) {
        return Err(VistaError::filter_value(key, "values must not repeat"));
    }
    for value in &values {
        if value.trim().is_empty() {
            return Err(VistaError::filter_value(key, "values must not be blank"));
        }
        if value.contains(',') {
            return Err(VistaError::filter_value(
                key,
                format!("'{value}' must not contain ','"),
            ));
        }
    }
    Ok(values)
}
