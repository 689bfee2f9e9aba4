//! Custom field arguments.
//!
//! On the command line a custom field is given as `name=value`, or as
//! `json:name=<json>` when the value is structured. Plain values are
//! converted according to the field's declared schema before they are sent
//! to Jira.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Errors produced while parsing or converting a custom field argument.
#[derive(Debug, thiserror::Error)]
pub enum CustomFieldError {
    #[error("invalid custom field '{0}': expected name=value")]
    Malformed(String),

    #[error("invalid JSON for custom field '{name}'")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("custom field '{name}' expects a number, got '{value}'")]
    NotANumber { name: String, value: String },
}

/// The value part of a custom field argument.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomValue {
    /// `name=value`: converted later according to the field schema.
    Text(String),
    /// `json:name=<json>`: sent as-is.
    Json(Value),
}

/// A parsed `--custom` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomArg {
    pub name: String,
    pub value: CustomValue,
}

impl CustomArg {
    /// Parse `name=value` or `json:name=<json>`.
    pub fn parse(raw: &str) -> Result<Self, CustomFieldError> {
        let (is_json, rest) = match raw.strip_prefix("json:") {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (name, value) = rest
            .split_once('=')
            .ok_or_else(|| CustomFieldError::Malformed(raw.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CustomFieldError::Malformed(raw.to_string()));
        }

        let value = if is_json {
            let parsed = serde_json::from_str(value).map_err(|source| CustomFieldError::Json {
                name: name.to_string(),
                source,
            })?;
            CustomValue::Json(parsed)
        } else {
            CustomValue::Text(value.to_string())
        };

        Ok(Self {
            name: name.to_string(),
            value,
        })
    }

    /// Convert the value into the JSON Jira expects for a field of `schema`.
    pub fn to_json(&self, schema: FieldSchema) -> Result<Value, CustomFieldError> {
        let text = match &self.value {
            CustomValue::Json(v) => return Ok(v.clone()),
            CustomValue::Text(t) => t,
        };
        let value = match schema {
            FieldSchema::String => Value::String(text.clone()),
            FieldSchema::Number => {
                let n: f64 = text.trim().parse().map_err(|_| CustomFieldError::NotANumber {
                    name: self.name.clone(),
                    value: text.clone(),
                })?;
                serde_json::Number::from_f64(n)
                    .map(Value::Number)
                    .ok_or_else(|| CustomFieldError::NotANumber {
                        name: self.name.clone(),
                        value: text.clone(),
                    })?
            }
            FieldSchema::Option => serde_json::json!({ "value": text }),
            FieldSchema::Array => Value::Array(
                text.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| Value::String(s.to_string()))
                    .collect(),
            ),
        };
        Ok(value)
    }
}

/// How a custom field's plain-text value is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSchema {
    #[default]
    String,
    Number,
    Option,
    Array,
}

impl fmt::Display for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Option => "option",
            Self::Array => "array",
        };
        f.write_str(s)
    }
}
