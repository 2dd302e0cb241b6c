use std::fmt;

use thiserror::Error;

use crate::filter::FilterKey;

/// The closed domains a raw string can be parsed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    ViewType,
    GroupBy,
    OrderBy,
    Property,
    FilterKey,
    IssueType,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::ViewType => write!(f, "view type"),
            KeyKind::GroupBy => write!(f, "group-by key"),
            KeyKind::OrderBy => write!(f, "order-by key"),
            KeyKind::Property => write!(f, "display property"),
            KeyKind::FilterKey => write!(f, "filter key"),
            KeyKind::IssueType => write!(f, "issue type"),
        }
    }
}

#[derive(Error, Debug)]
pub enum VistaError {
    #[error("invalid {kind} '{value}'")]
    InvalidKey { kind: KeyKind, value: String },

    #[error("invalid value for filter '{key}': {reason}")]
    InvalidFilterValue { key: FilterKey, reason: String },

    #[error("'{option}' is not available in {view} view")]
    OptionUnavailable { option: String, view: String },

    #[error("invalid workspace '{0}'")]
    InvalidWorkspace(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VistaError {
    pub fn invalid_view_type(value: String) -> Self {
        VistaError::InvalidKey {
            kind: KeyKind::ViewType,
            value,
        }
    }

    pub fn invalid_group_by(value: String) -> Self {
        VistaError::InvalidKey {
            kind: KeyKind::GroupBy,
            value,
        }
    }

    pub fn invalid_order_by(value: String) -> Self {
        VistaError::InvalidKey {
            kind: KeyKind::OrderBy,
            value,
        }
    }

    pub fn invalid_property(value: String) -> Self {
        VistaError::InvalidKey {
            kind: KeyKind::Property,
            value,
        }
    }

    pub fn invalid_filter_key(value: String) -> Self {
        VistaError::InvalidKey {
            kind: KeyKind::FilterKey,
            value,
        }
    }

    pub fn invalid_issue_type(value: String) -> Self {
        VistaError::InvalidKey {
            kind: KeyKind::IssueType,
            value,
        }
    }

    pub(crate) fn filter_value(key: FilterKey, reason: impl Into<String>) -> Self {
        VistaError::InvalidFilterValue {
            key,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VistaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_message_names_domain() {
        let err = VistaError::invalid_group_by("colour".to_string());
        assert_eq!(err.to_string(), "invalid group-by key 'colour'");

        let err = VistaError::invalid_property("avatar".to_string());
        assert_eq!(err.to_string(), "invalid display property 'avatar'");
    }

    #[test]
    fn test_filter_value_message() {
        let err = VistaError::filter_value(FilterKey::StartDate, "expected a list of dates");
        assert_eq!(
            err.to_string(),
            "invalid value for filter 'start_date': expected a list of dates"
        );
    }
}
