//! # Query Parameter Normalizer
//!
//! Splits one raw query-string map into its four independent parts: filter
//! document, sort keys, field projection, and pagination. Each derivation
//! reads the map without modifying it, so the parts can be extracted in any
//! order from the same request.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::rewrite::rewrite_operators;
use super::translate::{Projection, SortKey};

/// Raw query-string parameters as received from the request.
///
/// Duplicate keys collapse to the last value; this is the extractor's
/// behavior, not ours.
pub type RawParameters = HashMap<String, String>;

/// Reserved control keys that never become filter fields
pub const CONTROL_KEYS: [&str; 4] = ["page", "limit", "sort", "fields"];

/// Page used when `page` is absent or non-numeric
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when `limit` is absent or non-numeric
pub const DEFAULT_LIMIT: u64 = 3;

/// Extract the filter document from raw parameters.
///
/// Control keys are dropped, `field[op]` bracket suffixes become the nested
/// operator form, remaining keys are scalar equality, and comparison
/// keywords get the store sigil via [`rewrite_operators`].
pub fn extract_filter(params: &RawParameters) -> Map<String, Value> {
    let mut filter = Map::new();

    for (key, raw) in params {
        if CONTROL_KEYS.contains(&key.as_str()) {
            continue;
        }
        let value = parse_scalar(raw);
        match split_bracket_key(key) {
            Some((field, op)) => {
                let entry = filter
                    .entry(field.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Value::Object(ops) = entry {
                    ops.insert(op.to_string(), value);
                }
            }
            None => {
                filter.insert(key.clone(), value);
            }
        }
    }

    rewrite_operators(filter)
}

/// Derive the sort keys: absent means newest first.
pub fn derive_sort(params: &RawParameters) -> Vec<SortKey> {
    match params.get("sort") {
        None => vec![SortKey::descending("createdAt")],
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| match token.strip_prefix('-') {
                Some(field) => SortKey::descending(field),
                None => SortKey::ascending(token),
            })
            .collect(),
    }
}

/// Derive the projection: absent means everything except the revision
/// field; an explicit `fields` list is an inclusion set with no default
/// exclusion applied.
pub fn derive_projection(params: &RawParameters) -> Projection {
    match params.get("fields") {
        None => Projection::Exclude(vec!["__v".to_string()]),
        Some(raw) => Projection::Include(
            raw.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect(),
        ),
    }
}

/// Derived pagination values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub skip: u64,
    /// Whether the caller supplied `page` itself. Only an explicit page can
    /// trigger the out-of-range check on list queries.
    pub explicit_page: bool,
}

/// Derive pagination: `skip = (page - 1) * limit`. Missing or non-numeric
/// values fall back to the defaults silently, never as an error. The skip
/// math saturates, so absurd page/limit combinations pin `skip` at
/// `u64::MAX` and land in the out-of-range check instead of wrapping.
pub fn derive_pagination(params: &RawParameters) -> Pagination {
    let page = params
        .get("page")
        .and_then(|raw| raw.parse::<u64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(DEFAULT_PAGE);
    let limit = params
        .get("limit")
        .and_then(|raw| raw.parse::<u64>().ok())
        .filter(|limit| *limit >= 1)
        .unwrap_or(DEFAULT_LIMIT);

    Pagination {
        page,
        limit,
        skip: page.saturating_sub(1).saturating_mul(limit),
        explicit_page: params.contains_key("page"),
    }
}

/// Split a `field[op]` key into its field and operator parts.
fn split_bracket_key(key: &str) -> Option<(&str, &str)> {
    let open = key.find('[')?;
    let inner = key[open + 1..].strip_suffix(']')?;
    if open == 0 || inner.is_empty() {
        return None;
    }
    Some((&key[..open], inner))
}

/// Type a raw scalar the store's way: bool, integer, float, else string.
fn parse_scalar(raw: &str) -> Value {
    if raw == "true" {
        return Value::Bool(true);
    }
    if raw == "false" {
        return Value::Bool(false);
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = raw.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(n) {
            return Value::Number(number);
        }
    }
    Value::String(raw.to_string())
}
