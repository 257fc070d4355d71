//! Configured measurement records and family grouping keys.

use indexmap::IndexMap;
use serde::Deserialize;

/// Label name -> label value, in config declaration order.
///
/// Declaration order matters: the first record of a family fixes the
/// positional label schema, so a plain `HashMap` would scramble it.
pub type Labels = IndexMap<String, String>;

/// One measurement as listed in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricRecord {
    /// Time-series name; token validity is checked by the registry.
    pub name: String,
    /// Help text. Only the record that creates a family gets to set it.
    #[serde(default)]
    pub help: String,
    /// Current gauge reading.
    pub value: f64,
    /// Label set; may be empty.
    #[serde(default)]
    pub labels: Labels,
}

/// Separator for key components. U+001F is outside the legal name alphabet
/// (`[a-zA-Z0-9_:]`), so `("a_b", {c})` and `("a", {b_c})` cannot collide.
const KEY_SEP: char = '\u{001F}';

/// Lookup key grouping records into families: the metric name joined with
/// the record's label names sorted lexicographically. Label declaration
/// order and label values do not participate.
pub fn family_key(name: &str, labels: &Labels) -> String {
    let mut names: Vec<&str> = labels.keys().map(String::as_str).collect();
    names.sort_unstable();

    let mut key = String::with_capacity(name.len() + names.iter().map(|n| n.len() + 1).sum::<usize>());
    key.push_str(name);
    for n in names {
        key.push(KEY_SEP);
        key.push_str(n);
    }
    key
}
