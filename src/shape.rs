//! Shape checks applied to upstream JSON before any field is read.
//!
//! Each list endpoint has a [`Shape`]: the top level must be an array and
//! every element an object carrying the required fields with the right JSON
//! type. Unknown keys are ignored. Required strings must be non-empty.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{BadgeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    String,
    Number,
}

impl FieldKind {
    fn describe(self) -> &'static str {
        match self {
            FieldKind::String => "a non-empty string",
            FieldKind::Number => "a number",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.as_str().is_some_and(|s| !s.is_empty()),
            FieldKind::Number => value.is_number(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    ProjectList,
    ColumnList,
    CardList,
}

impl Shape {
    pub fn name(self) -> &'static str {
        match self {
            Shape::ProjectList => "project list",
            Shape::ColumnList => "column list",
            Shape::CardList => "card list",
        }
    }

    fn required_fields(self) -> &'static [(&'static str, FieldKind)] {
        match self {
            Shape::ProjectList => &[
                ("state", FieldKind::String),
                ("name", FieldKind::String),
                ("number", FieldKind::Number),
                ("id", FieldKind::Number),
            ],
            Shape::ColumnList => &[("name", FieldKind::String), ("id", FieldKind::Number)],
            Shape::CardList => &[("id", FieldKind::Number)],
        }
    }

    fn invalid(self, reason: String) -> BadgeError {
        BadgeError::InvalidResponse {
            shape: self.name(),
            reason,
        }
    }

    /// Check `value` against this shape without converting it.
    pub fn validate(self, value: &Value) -> Result<()> {
        let items = value.as_array().ok_or_else(|| {
            self.invalid(format!("expected an array, got {}", json_kind(value)))
        })?;

        for (index, item) in items.iter().enumerate() {
            let object = item.as_object().ok_or_else(|| {
                self.invalid(format!(
                    "element {index}: expected an object, got {}",
                    json_kind(item)
                ))
            })?;

            for &(field, kind) in self.required_fields() {
                match object.get(field) {
                    None => {
                        return Err(self.invalid(format!(
                            "element {index}: missing required field `{field}`"
                        )))
                    }
                    Some(v) if !kind.accepts(v) => {
                        return Err(self.invalid(format!(
                            "element {index}: field `{field}` must be {}",
                            kind.describe()
                        )))
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(())
    }

    /// Validate, then deserialize into typed elements.
    pub fn parse<T: DeserializeOwned>(self, value: Value) -> Result<Vec<T>> {
        self.validate(&value)?;
        serde_json::from_value(value).map_err(|e| self.invalid(e.to_string()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
