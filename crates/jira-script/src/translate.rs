//! Translation of an interpolated action into an `issue` subcommand
//! invocation.

use std::collections::BTreeMap;

use crate::error::{Result, ScriptError};
use crate::value::Value;

/// Field naming the subcommand.
pub const ACTION_FIELD: &str = "action";
/// Field holding positional arguments.
pub const ARGS_FIELD: &str = "args";
/// Field holding custom field values.
pub const CUSTOM_FIELD: &str = "custom";

/// A subcommand name plus its argument vector (without the name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub action: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// The argument vector with the subcommand name in front.
    pub fn command_line(&self) -> Vec<String> {
        let mut line = Vec::with_capacity(self.args.len() + 1);
        line.push(self.action.clone());
        line.extend(self.args.iter().cloned());
        line
    }
}

/// Returns the `action` property of an action record.
///
/// `index` is the 1-based position of the action, used in error messages.
pub fn action_name(action: &BTreeMap<String, Value>, index: usize) -> Result<&str> {
    match action.get(ACTION_FIELD) {
        None => Err(ScriptError::MissingAction { index }),
        Some(Value::Scalar(name)) => Ok(name),
        Some(_) => Err(ScriptError::InvalidAction { index }),
    }
}

/// Translate an interpolated action record into an invocation.
///
/// - `action` names the subcommand and is not emitted;
/// - `args` become positional arguments (one per sequence item);
/// - `custom` entries become `--custom name=value`, or
///   `--custom json:name=<json>` for mapping values;
/// - any other field `k` becomes `--k value`, repeated per item when the
///   value is a sequence.
pub fn translate(action: &BTreeMap<String, Value>, index: usize) -> Result<Invocation> {
    let name = action_name(action, index)?.to_string();
    let mut args = Vec::new();

    for (key, value) in action {
        match key.as_str() {
            ACTION_FIELD => continue,
            ARGS_FIELD => match value {
                Value::Sequence(items) => {
                    args.extend(items.iter().map(Value::to_arg_string));
                }
                other => args.push(other.to_arg_string()),
            },
            CUSTOM_FIELD => {
                let customs = value.as_mapping().ok_or(ScriptError::InvalidCustom)?;
                for (field, field_value) in customs {
                    args.push("--custom".to_string());
                    match field_value {
                        Value::Mapping(_) => {
                            args.push(format!("json:{}={}", field, field_value.to_json()));
                        }
                        other => args.push(format!("{}={}", field, other.to_arg_string())),
                    }
                }
            }
            _ => match value {
                Value::Sequence(items) => {
                    for item in items {
                        args.push(format!("--{}", key));
                        args.push(item.to_arg_string());
                    }
                }
                other => {
                    args.push(format!("--{}", key));
                    args.push(other.to_arg_string());
                }
            },
        }
    }

    Ok(Invocation { action: name, args })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(yaml: &str) -> BTreeMap<String, Value> {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        value.as_mapping().unwrap().clone()
    }

    /// Splits an argument vector into (positionals, flag pairs) so tests do
    /// not depend on field order.
    fn split(args: &[String]) -> (Vec<String>, Vec<(String, String)>) {
        let mut positionals = Vec::new();
        let mut flags = Vec::new();
        let mut i = 0;
        while i < args.len() {
            if args[i].starts_with("--") {
                flags.push((args[i].clone(), args[i + 1].clone()));
                i += 2;
            } else {
                positionals.push(args[i].clone());
                i += 1;
            }
        }
        (positionals, flags)
    }

    fn pair(flag: &str, value: &str) -> (String, String) {
        (flag.to_string(), value.to_string())
    }

    #[test]
    fn action_field_is_not_emitted() {
        let inv = translate(&record("action: view\n"), 1).unwrap();
        assert_eq!(inv.action, "view");
        assert!(inv.args.is_empty());
    }

    #[test]
    fn scalar_field_becomes_flag() {
        let inv = translate(&record("action: create\nsummary: Build widget\n"), 1).unwrap();
        assert_eq!(inv.args, vec!["--summary", "Build widget"]);
    }

    #[test]
    fn sequence_field_repeats_flag_in_order() {
        let inv = translate(&record("action: label\nlabels: [a, b]\n"), 1).unwrap();
        assert_eq!(inv.args, vec!["--labels", "a", "--labels", "b"]);
    }

    #[test]
    fn args_become_positionals() {
        let inv = translate(
            &record("action: comment\nargs: [add, PROJ-7, Looks good]\n"),
            1,
        )
        .unwrap();
        assert_eq!(inv.args, vec!["add", "PROJ-7", "Looks good"]);

        let single = translate(&record("action: view\nargs: PROJ-7\n"), 1).unwrap();
        assert_eq!(single.args, vec!["PROJ-7"]);
    }

    #[test]
    fn custom_fields() {
        let inv = translate(
            &record("action: edit\ncustom:\n  points: '3'\n  risk: {level: high}\n"),
            1,
        )
        .unwrap();
        let (_, flags) = split(&inv.args);
        assert!(flags.contains(&pair("--custom", "points=3")));
        assert!(flags.contains(&pair("--custom", r#"json:risk={"level":"high"}"#)));
        assert_eq!(flags.len(), 2);
    }

    #[test]
    fn custom_must_be_a_mapping() {
        let err = translate(&record("action: edit\ncustom: [a]\n"), 1).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidCustom));
    }

    #[test]
    fn mixed_fields_are_order_independent() {
        let inv = translate(
            &record(
                "action: create\nsummary: S\ntype: Bug\nlabel: [x, y]\nargs: [extra]\n",
            ),
            1,
        )
        .unwrap();
        let (positionals, flags) = split(&inv.args);
        assert_eq!(positionals, vec!["extra"]);
        let mut flags = flags;
        flags.sort();
        assert_eq!(
            flags,
            vec![
                pair("--label", "x"),
                pair("--label", "y"),
                pair("--summary", "S"),
                pair("--type", "Bug"),
            ]
        );
    }

    #[test]
    fn missing_or_invalid_action() {
        let err = translate(&record("summary: S\n"), 4).unwrap_err();
        assert!(matches!(err, ScriptError::MissingAction { index: 4 }));

        let err = translate(&record("action: [create]\n"), 2).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidAction { index: 2 }));
    }

    #[test]
    fn command_line_prepends_action() {
        let inv = Invocation {
            action: "assign".into(),
            args: vec!["PROJ-1".into(), "bob".into()],
        };
        assert_eq!(inv.command_line(), vec!["assign", "PROJ-1", "bob"]);
    }
}
