//! Slug derivation for the save path.

use serde_json::Value;

use super::{DocumentHook, HookResult};

/// Derive a URL-safe slug from a human-readable name.
///
/// Lowercase; runs of non-alphanumeric characters collapse to a single `-`
/// separator; no leading or trailing separator.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Before-save hook: recompute `slug` from `name`.
///
/// Runs on every save, so changing `name` on an update refreshes the slug
/// too. Documents without a `name` are left alone.
pub struct SlugHook;

impl DocumentHook for SlugHook {
    fn run(&self, document: &mut Value) -> HookResult {
        let slug = match document.get("name").and_then(Value::as_str) {
            Some(name) => slugify(name),
            None => return Ok(()),
        };
        if let Some(doc) = document.as_object_mut() {
            doc.insert("slug".to_string(), Value::String(slug));
        }
        Ok(())
    }
}
