use serde::{Deserialize, Serialize};

use crate::error::BadgeError;

/// The `{label, message, color, link}` tuple handed to a badge renderer.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BadgeDescriptor {
    pub label: String,
    pub message: String,
    pub color: String,
    pub link: Vec<String>,
}

impl BadgeDescriptor {
    /// Badge shown in place of a real value when a request fails.
    pub fn from_error(label: &str, err: &BadgeError) -> Self {
        let color = if err.is_upstream() { "lightgrey" } else { "red" };
        Self {
            label: label.to_string(),
            message: err.badge_message(),
            color: color.to_string(),
            link: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_badge_for_missing_column() {
        let err = BadgeError::NotFound {
            hint: "column not found".to_string(),
        };
        let badge = BadgeDescriptor::from_error("project", &err);
        assert_eq!(badge.label, "project");
        assert_eq!(badge.message, "column not found");
        assert_eq!(badge.color, "red");
        assert!(badge.link.is_empty());
    }

    #[test]
    fn test_error_badge_for_upstream_failure() {
        let err = BadgeError::Api {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        let badge = BadgeDescriptor::from_error("project", &err);
        assert_eq!(badge.message, "inaccessible");
        assert_eq!(badge.color, "lightgrey");
    }

    #[test]
    fn test_serializes_to_renderer_shape() {
        let badge = BadgeDescriptor {
            label: "My Project".to_string(),
            message: "open".to_string(),
            color: "red".to_string(),
            link: vec!["https://github.com/orgs/github/projects/1/".to_string()],
        };
        let value = serde_json::to_value(&badge).unwrap();
        assert_eq!(value["label"], "My Project");
        assert_eq!(value["link"][0], "https://github.com/orgs/github/projects/1/");
    }
}
