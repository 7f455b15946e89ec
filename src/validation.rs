use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

use crate::models::{ItemFilter, ItemPatch, ItemStatus, ListQuery, NewItem};

pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const QUERY_MAX_CHARS: usize = 200;

const STATUS_MESSAGE: &str = "Invalid enum value. Expected 'pending' | 'active' | 'archived'";

/// A single rule violation, tagged with the offending field ("" for the whole payload)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Issue {
    pub path: String,
    pub message: String,
}

/// Every violation found in one payload, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: Vec<Issue>,
}

impl ValidationErrors {
    fn push(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(Issue {
            path: path.to_string(),
            message: message.into(),
        });
    }

    fn single(path: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(path, message);
        errors
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.issues.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|issue| format!("{}: {}", issue.path, issue.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Validate a create payload
pub fn validate_create(body: &JsonValue) -> Result<NewItem, ValidationErrors> {
    let fields = expect_object(body)?;
    let mut errors = ValidationErrors::default();

    let name = name_field(fields, true, &mut errors);
    let description = description_field(fields, &mut errors);
    let status = status_field(fields, &mut errors);

    errors.into_result(NewItem {
        name: name.unwrap_or_default(),
        description,
        status,
    })
}

/// Validate an update payload; every field is optional but at least one is required
pub fn validate_update(body: &JsonValue) -> Result<ItemPatch, ValidationErrors> {
    let fields = expect_object(body)?;
    let mut errors = ValidationErrors::default();

    let patch = ItemPatch {
        name: name_field(fields, false, &mut errors),
        description: description_field(fields, &mut errors),
        status: status_field(fields, &mut errors),
    };

    if errors.issues.is_empty() && patch.is_empty() {
        errors.push("", "At least one field must be provided");
    }

    errors.into_result(patch)
}

/// Validate list query parameters. Empty strings count as absent.
pub fn validate_list_query(query: &ListQuery) -> Result<ItemFilter, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let status = match query.status.as_deref() {
        None | Some("") => None,
        Some(raw) => match raw.parse::<ItemStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.push("status", STATUS_MESSAGE);
                None
            }
        },
    };

    let query_text = match query.q.as_deref() {
        None | Some("") => None,
        Some(raw) if raw.chars().count() > QUERY_MAX_CHARS => {
            errors.push("q", too_long(QUERY_MAX_CHARS));
            None
        }
        Some(raw) => Some(raw.to_string()),
    };

    errors.into_result(ItemFilter {
        status,
        query: query_text,
    })
}

fn expect_object(body: &JsonValue) -> Result<&Map<String, JsonValue>, ValidationErrors> {
    body.as_object()
        .ok_or_else(|| ValidationErrors::single("", "Expected object"))
}

fn too_long(max: usize) -> String {
    format!("String must contain at most {} character(s)", max)
}

fn name_field(
    fields: &Map<String, JsonValue>,
    required: bool,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match fields.get("name") {
        None => {
            if required {
                errors.push("name", "Name is required");
            }
            None
        }
        Some(JsonValue::String(name)) if name.is_empty() => {
            errors.push("name", "Name is required");
            None
        }
        Some(JsonValue::String(name)) => Some(name.clone()),
        Some(_) => {
            errors.push("name", "Expected string");
            None
        }
    }
}

fn description_field(fields: &Map<String, JsonValue>, errors: &mut ValidationErrors) -> Option<String> {
    match fields.get("description") {
        None => None,
        Some(JsonValue::String(text)) if text.chars().count() > DESCRIPTION_MAX_CHARS => {
            errors.push("description", too_long(DESCRIPTION_MAX_CHARS));
            None
        }
        Some(JsonValue::String(text)) => Some(text.clone()),
        Some(_) => {
            errors.push("description", "Expected string");
            None
        }
    }
}

fn status_field(fields: &Map<String, JsonValue>, errors: &mut ValidationErrors) -> Option<ItemStatus> {
    let raw = fields.get("status")?;
    match raw.as_str().map(str::parse::<ItemStatus>) {
        Some(Ok(status)) => Some(status),
        _ => {
            errors.push("status", STATUS_MESSAGE);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(errors: &ValidationErrors) -> Vec<&str> {
        errors.issues().iter().map(|issue| issue.path.as_str()).collect()
    }

    #[test]
    fn test_create_with_only_name() {
        let new_item = validate_create(&json!({"name": "Task A"})).unwrap();
        assert_eq!(new_item.name, "Task A");
        assert_eq!(new_item.description, None);
        assert_eq!(new_item.status, None);
    }

    #[test]
    fn test_create_with_all_fields() {
        let new_item = validate_create(&json!({
            "name": "Task A",
            "description": "details",
            "status": "archived"
        }))
        .unwrap();
        assert_eq!(new_item.description.as_deref(), Some("details"));
        assert_eq!(new_item.status, Some(ItemStatus::Archived));
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let errors = validate_create(&json!({"name": ""})).unwrap_err();
        assert_eq!(paths(&errors), vec!["name"]);
        assert_eq!(errors.issues()[0].message, "Name is required");
    }

    #[test]
    fn test_create_rejects_missing_name() {
        let errors = validate_create(&json!({"description": "no name"})).unwrap_err();
        assert_eq!(paths(&errors), vec!["name"]);
    }

    #[test]
    fn test_create_reports_every_violation() {
        let errors = validate_create(&json!({
            "name": 7,
            "description": "x".repeat(DESCRIPTION_MAX_CHARS + 1),
            "status": "done"
        }))
        .unwrap_err();
        assert_eq!(paths(&errors), vec!["name", "description", "status"]);
        assert_eq!(errors.issues()[0].message, "Expected string");
        assert_eq!(errors.issues()[2].message, STATUS_MESSAGE);
    }

    #[test]
    fn test_description_limit_counts_characters() {
        let exactly_max = "é".repeat(DESCRIPTION_MAX_CHARS);
        assert!(validate_create(&json!({"name": "n", "description": exactly_max})).is_ok());
    }

    #[test]
    fn test_create_rejects_non_object() {
        let errors = validate_create(&json!(["name"])).unwrap_err();
        assert_eq!(paths(&errors), vec![""]);
        assert_eq!(errors.issues()[0].message, "Expected object");
    }

    #[test]
    fn test_create_rejects_null_fields() {
        let errors =
            validate_create(&json!({"name": "n", "description": null, "status": null})).unwrap_err();
        assert_eq!(paths(&errors), vec!["description", "status"]);
        assert_eq!(errors.issues()[0].message, "Expected string");
        assert_eq!(errors.issues()[1].message, STATUS_MESSAGE);
    }

    #[test]
    fn test_update_null_name_is_a_type_error() {
        let errors = validate_update(&json!({"name": null})).unwrap_err();
        assert_eq!(paths(&errors), vec!["name"]);
        assert_eq!(errors.issues()[0].message, "Expected string");
    }

    #[test]
    fn test_update_accepts_single_field() {
        let patch = validate_update(&json!({"description": "x"})).unwrap();
        assert_eq!(patch.description.as_deref(), Some("x"));
        assert_eq!(patch.name, None);
        assert_eq!(patch.status, None);
    }

    #[test]
    fn test_update_rejects_empty_payload() {
        let errors = validate_update(&json!({})).unwrap_err();
        assert_eq!(errors.issues().len(), 1);
        assert_eq!(errors.issues()[0].message, "At least one field must be provided");
    }

    #[test]
    fn test_update_rejects_unknown_fields_only() {
        assert!(validate_update(&json!({"colour": "red"})).is_err());
    }

    #[test]
    fn test_update_rejects_empty_name() {
        let errors = validate_update(&json!({"name": "", "status": "active"})).unwrap_err();
        assert_eq!(paths(&errors), vec!["name"]);
    }

    #[test]
    fn test_list_query_empty_strings_are_absent() {
        let filter = validate_list_query(&ListQuery {
            status: Some(String::new()),
            q: Some(String::new()),
        })
        .unwrap();
        assert_eq!(filter, ItemFilter::default());
    }

    #[test]
    fn test_list_query_valid() {
        let filter = validate_list_query(&ListQuery {
            status: Some("active".to_string()),
            q: Some("foo".to_string()),
        })
        .unwrap();
        assert_eq!(filter.status, Some(ItemStatus::Active));
        assert_eq!(filter.query.as_deref(), Some("foo"));
    }

    #[test]
    fn test_list_query_rejects_bad_status_and_long_query() {
        let errors = validate_list_query(&ListQuery {
            status: Some("done".to_string()),
            q: Some("q".repeat(QUERY_MAX_CHARS + 1)),
        })
        .unwrap_err();
        assert_eq!(paths(&errors), vec!["status", "q"]);
    }

    #[test]
    fn test_display_joins_issues() {
        let errors = validate_create(&json!({})).unwrap_err();
        assert_eq!(errors.to_string(), "name: Name is required");
    }
}
