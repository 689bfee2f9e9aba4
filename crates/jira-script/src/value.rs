//! The dynamic value tree actions are made of.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// A value read from a script action.
///
/// Scripts only use strings, sequences and string-keyed mappings. Anything
/// else the YAML parser produces (numbers, booleans, nulls, tagged values,
/// mappings with non-string keys) is kept as [`Value::Unsupported`] so the
/// error surfaces when the action containing it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    Sequence(Vec<Value>),
    Mapping(BTreeMap<String, Value>),
    /// Holds the YAML kind, e.g. `"number"`, for error messages.
    Unsupported(String),
}

impl Value {
    /// Shorthand for building a scalar.
    pub fn scalar(s: impl Into<String>) -> Self {
        Self::Scalar(s.into())
    }

    /// Returns the string if this is a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the entries if this is a mapping.
    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// A short name for the kind of value, used in error messages.
    pub fn kind(&self) -> &str {
        match self {
            Self::Scalar(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Unsupported(kind) => kind,
        }
    }

    /// Render the value as a single command-line argument.
    ///
    /// Scalars are used as-is, sequences join their items with `,` and
    /// mappings become compact JSON.
    pub fn to_arg_string(&self) -> String {
        match self {
            Self::Scalar(s) => s.clone(),
            Self::Sequence(items) => items
                .iter()
                .map(Value::to_arg_string)
                .collect::<Vec<_>>()
                .join(","),
            Self::Mapping(_) => self.to_json().to_string(),
            Self::Unsupported(kind) => format!("<{}>", kind),
        }
    }

    /// Convert to JSON. Mapping keys come out sorted.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Scalar(s) => serde_json::Value::String(s.clone()),
            Self::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Self::Mapping(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Unsupported(_) => serde_json::Value::Null,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_string())
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(yaml: serde_yaml::Value) -> Self {
        use serde_yaml::Value as Yaml;

        match yaml {
            Yaml::String(s) => Self::Scalar(s),
            Yaml::Sequence(items) => Self::Sequence(items.into_iter().map(Value::from).collect()),
            Yaml::Mapping(mapping) => {
                let mut entries = BTreeMap::new();
                for (key, value) in mapping {
                    match key {
                        Yaml::String(k) => {
                            entries.insert(k, Value::from(value));
                        }
                        _ => return Self::Unsupported("mapping with non-string keys".into()),
                    }
                }
                Self::Mapping(entries)
            }
            Yaml::Null => Self::Unsupported("null".into()),
            Yaml::Bool(_) => Self::Unsupported("bool".into()),
            Yaml::Number(n) => {
                let kind = if n.is_f64() { "float" } else { "int" };
                Self::Unsupported(kind.into())
            }
            Yaml::Tagged(tagged) => Self::Unsupported(format!("tagged {}", tagged.tag)),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_yaml::Value::deserialize(deserializer).map(Value::from)
    }
}
