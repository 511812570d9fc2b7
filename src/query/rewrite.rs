//! # Operator Rewriter
//!
//! Rewrites bare comparison keywords in a filter document into the store's
//! `$`-prefixed operator syntax.

use serde_json::{Map, Value};

/// Comparison keywords that receive the store sigil
const COMPARISON_OPERATORS: [&str; 4] = ["gt", "gte", "lt", "lte"];

/// Rewrite bare comparison operator keys (`gt`, `gte`, `lt`, `lte`) into
/// their `$`-prefixed form.
///
/// The walk is structural: only whole map keys are rewritten, never
/// substrings of longer keys and never values, so a field named `budgeted`
/// or a string value containing `gte` stays untouched. All other keys pass
/// through verbatim; the store is the validation authority for anything it
/// does not understand.
pub fn rewrite_operators(filter: Map<String, Value>) -> Map<String, Value> {
    filter
        .into_iter()
        .map(|(key, value)| {
            let key = if COMPARISON_OPERATORS.contains(&key.as_str()) {
                format!("${}", key)
            } else {
                key
            };
            let value = match value {
                Value::Object(nested) => Value::Object(rewrite_operators(nested)),
                other => other,
            };
            (key, value)
        })
        .collect()
}
