//! `$variable` substitution over action value trees.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, ScriptError};
use crate::resolve::Variables;
use crate::value::Value;

/// Marker that starts a variable reference.
const MARKER: u8 = b'$';

/// Substitute every `$name` reference inside the string scalars of `value`.
///
/// The result has the same shape as the input: sequences keep their
/// length and order, mappings keep their keys. A reference to a variable
/// missing from `vars` is an error, never an empty substitution.
pub fn interpolate(value: &Value, vars: &Variables) -> Result<Value> {
    match value {
        Value::Scalar(s) => interpolate_str(s, vars).map(Value::Scalar),
        Value::Sequence(items) => items
            .iter()
            .map(|item| interpolate(item, vars))
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
        Value::Mapping(entries) => interpolate_mapping(entries, vars).map(Value::Mapping),
        Value::Unsupported(kind) => Err(ScriptError::UnsupportedValue { kind: kind.clone() }),
    }
}

/// [`interpolate`] for a mapping, such as a whole action record.
pub fn interpolate_mapping(
    entries: &BTreeMap<String, Value>,
    vars: &Variables,
) -> Result<BTreeMap<String, Value>> {
    entries
        .iter()
        .map(|(k, v)| Ok((k.clone(), interpolate(v, vars)?)))
        .collect()
}

/// Substitute `$name` references in a single string.
pub fn interpolate_str(text: &str, vars: &Variables) -> Result<String> {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for (start, end) in references_in(text) {
        let name = &text[start + 1..end];
        let value = vars
            .get(name)
            .ok_or_else(|| ScriptError::UndefinedVariable {
                name: name.to_string(),
            })?;
        result.push_str(&text[last..start]);
        result.push_str(value);
        last = end;
    }
    result.push_str(&text[last..]);
    Ok(result)
}

/// Collect the names of all variables `value` refers to.
pub fn references(value: &Value) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    collect_references(value, &mut names);
    names
}

fn collect_references(value: &Value, names: &mut BTreeSet<String>) {
    match value {
        Value::Scalar(s) => {
            for (start, end) in references_in(s) {
                names.insert(s[start + 1..end].to_string());
            }
        }
        Value::Sequence(items) => items.iter().for_each(|v| collect_references(v, names)),
        Value::Mapping(entries) => entries.values().for_each(|v| collect_references(v, names)),
        Value::Unsupported(_) => {}
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Byte ranges `[start, end)` of each `$word` reference, left to right.
///
/// `start` points at the marker. A marker not followed by a word
/// character is plain text.
fn references_in(text: &str) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut refs = Vec::new();
    let mut i = 0;
    while i < len {
        if bytes[i] == MARKER && i + 1 < len && is_word(bytes[i + 1]) {
            let mut end = i + 2;
            while end < len && is_word(bytes[end]) {
                end += 1;
            }
            refs.push((i, end));
            i = end;
            continue;
        }
        i += 1;
    }
    refs
}
