//! Tour schema: required fields, defaults, and normalization applied at
//! create and update time.
//!
//! Documents stay `serde_json::Value` objects all the way through; this
//! module is the single place that knows which fields a tour must carry.

use serde_json::{json, Map, Value};

use crate::errors::{ApiError, ApiResult};

/// Fields every persisted tour must carry with a non-empty value
pub const REQUIRED_FIELDS: [&str; 7] = [
    "name",
    "duration",
    "maxGroupSize",
    "difficulty",
    "price",
    "summary",
    "imageCover",
];

/// Fields that must be numbers when present
const NUMERIC_FIELDS: [&str; 6] = [
    "duration",
    "maxGroupSize",
    "price",
    "priceDiscount",
    "ratingsAverage",
    "ratingsQuantity",
];

/// Fields trimmed of surrounding whitespace
const TRIMMED_FIELDS: [&str; 3] = ["name", "summary", "description"];

/// Validate a full tour document in place, trimming strings and filling
/// schema defaults.
///
/// Runs on create and, with the merged document, on update
/// (`runValidators` semantics), so a patch cannot null out a required
/// field.
pub fn validate(document: &mut Value) -> ApiResult<()> {
    let doc = document
        .as_object_mut()
        .ok_or_else(|| ApiError::Validation("a tour must be a JSON object".to_string()))?;

    trim_strings(doc);

    for field in REQUIRED_FIELDS {
        let missing = match doc.get(field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        };
        if missing {
            return Err(ApiError::Validation(format!(
                "a tour must have a {}",
                field
            )));
        }
    }

    for field in NUMERIC_FIELDS {
        if let Some(value) = doc.get(field) {
            if !value.is_null() && !value.is_number() {
                return Err(ApiError::Validation(format!(
                    "{} must be a number",
                    field
                )));
            }
        }
    }

    if let Some(value) = doc.get("secretTour") {
        if !value.is_boolean() {
            return Err(ApiError::Validation(
                "secretTour must be a boolean".to_string(),
            ));
        }
    }

    apply_defaults(doc);
    Ok(())
}

fn trim_strings(doc: &mut Map<String, Value>) {
    for field in TRIMMED_FIELDS {
        if let Some(Value::String(s)) = doc.get_mut(field) {
            let trimmed = s.trim();
            if trimmed.len() != s.len() {
                *s = trimmed.to_string();
            }
        }
    }
}

fn apply_defaults(doc: &mut Map<String, Value>) {
    doc.entry("ratingsAverage").or_insert(json!(4.5));
    doc.entry("ratingsQuantity").or_insert(json!(0));
    doc.entry("secretTour").or_insert(json!(false));
    doc.entry("images").or_insert(json!([]));
    doc.entry("startDates").or_insert(json!([]));
}
