//! Filter-document evaluation for the in-memory store.
//!
//! Top-level filter entries are conjunctive; `$and` nests further
//! conjunctions (the translator's hooks inject clauses there). The store is
//! the validation authority for operator keys: anything it does not
//! understand is an `InvalidFilter` error rather than a silent no-match.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use super::{StoreError, StoreResult};

/// Comparison operators understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl FilterOperator {
    /// Parse a `$`-prefixed operator key
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "$eq" => Some(Self::Eq),
            "$ne" => Some(Self::Ne),
            "$gt" => Some(Self::Gt),
            "$gte" => Some(Self::Gte),
            "$lt" => Some(Self::Lt),
            "$lte" => Some(Self::Lte),
            _ => None,
        }
    }

    /// Check a document field value against an operand.
    ///
    /// `$ne` treats a missing field as not-equal, so `{$ne: true}` matches
    /// documents that never set the flag at all.
    fn matches(&self, field_value: Option<&Value>, operand: &Value) -> bool {
        match self {
            Self::Eq => field_value == Some(operand),
            Self::Ne => field_value != Some(operand),
            Self::Gt | Self::Gte | Self::Lt | Self::Lte => {
                let Some(field_value) = field_value else {
                    return false;
                };
                let Some(ord) = compare_values(field_value, operand) else {
                    return false;
                };
                match self {
                    Self::Gt => ord == Ordering::Greater,
                    Self::Gte => ord != Ordering::Less,
                    Self::Lt => ord == Ordering::Less,
                    Self::Lte => ord != Ordering::Greater,
                    Self::Eq | Self::Ne => unreachable!(),
                }
            }
        }
    }
}

/// Check one document against a filter document.
pub fn matches_filter(document: &Value, filter: &Map<String, Value>) -> StoreResult<bool> {
    for (key, condition) in filter {
        if key == "$and" {
            let Value::Array(clauses) = condition else {
                return Err(StoreError::InvalidFilter(
                    "$and expects an array of objects".to_string(),
                ));
            };
            for clause in clauses {
                let Value::Object(clause) = clause else {
                    return Err(StoreError::InvalidFilter(
                        "$and expects an array of objects".to_string(),
                    ));
                };
                if !matches_filter(document, clause)? {
                    return Ok(false);
                }
            }
            continue;
        }
        if key.starts_with('$') {
            return Err(StoreError::InvalidFilter(format!(
                "unknown operator: {}",
                key
            )));
        }

        let field_value = document.get(key);
        match condition {
            Value::Object(operators) => {
                for (op_key, operand) in operators {
                    let op = FilterOperator::from_key(op_key).ok_or_else(|| {
                        StoreError::InvalidFilter(format!("unknown operator: {}", op_key))
                    })?;
                    if !op.matches(field_value, operand) {
                        return Ok(false);
                    }
                }
            }
            scalar => {
                if field_value != Some(scalar) {
                    return Ok(false);
                }
            }
        }
    }
    Ok(true)
}

/// Order two JSON scalars when they are comparable
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
