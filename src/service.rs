//! Tour CRUD orchestration.
//!
//! One function per verb. Each call runs the same shape: translate the
//! input, run the matching lifecycle hooks, hit the store, run the after
//! hooks. Operation names mirror the store verbs (`save`, `find`,
//! `findById`, `findByIdAndUpdate`, `findByIdAndDelete`) so the hook
//! patterns match on real names, which puts every id-based read, update,
//! and delete inside the find family and therefore behind visibility
//! narrowing.

use std::time::Instant;

use serde_json::{Map, Value};

use crate::errors::{ApiError, ApiResult};
use crate::hooks::slug::SlugHook;
use crate::hooks::timestamps::CreatedAtHook;
use crate::hooks::timing::QueryTimer;
use crate::hooks::visibility::VisibilityHook;
use crate::hooks::{HookSet, Phase};
use crate::model::tour;
use crate::query::{translate, Projection, QueryDescriptor, RawParameters};
use crate::store::ResourceStore;

/// CRUD and list operations over the tour resource
pub struct TourService<S: ResourceStore> {
    store: S,
    hooks: HookSet,
}

impl<S: ResourceStore> TourService<S> {
    /// Build the service with the standard tour hook registrations.
    pub fn new(store: S) -> Self {
        let hooks = HookSet::new()
            .on_save(Phase::Before, SlugHook)
            .on_save(Phase::Before, CreatedAtHook)
            .before_find(VisibilityHook::hide_flagged("secretTour"))
            .after_find(QueryTimer);
        Self::with_hooks(store, hooks)
    }

    /// Build the service with custom hook registrations.
    pub fn with_hooks(store: S, hooks: HookSet) -> Self {
        Self { store, hooks }
    }

    /// Create a tour. Validation and the before-save chain both run ahead
    /// of persistence; a veto anywhere means nothing is stored.
    pub fn create(&self, mut document: Value) -> ApiResult<Value> {
        tour::validate(&mut document)?;
        self.hooks.run_before_save("save", &mut document)?;
        let mut created = self.store.create(document)?;
        self.hooks.run_after_save("save", &mut created)?;
        Ok(created)
    }

    /// List tours for one raw request-parameter map.
    ///
    /// The out-of-range check fires only when the caller supplied `page`
    /// itself; the same skip/limit reached through the defaults never
    /// raises it. The count runs against the hook-narrowed filter, so
    /// hidden documents do not pad the total.
    pub fn list(&self, params: &RawParameters) -> ApiResult<Vec<Value>> {
        let started = Instant::now();
        let mut query = translate(params);
        self.hooks.run_before_find("find", &mut query)?;

        if query.explicit_page.is_some() {
            let total = self.store.count(&query.filter)?;
            if query.skip >= total {
                return Err(ApiError::PageOutOfRange {
                    skip: query.skip,
                    total,
                });
            }
        }

        let results = self.store.find(&query)?;
        self.hooks.run_after_find("find", &results, started);
        Ok(results)
    }

    /// Fetch one tour by id. Hidden documents look absent.
    pub fn get(&self, id: &str) -> ApiResult<Value> {
        let started = Instant::now();
        let mut query = Self::id_query(id);
        self.hooks.run_before_find("findById", &mut query)?;

        let results = self.store.find(&query)?;
        self.hooks.run_after_find("findById", &results, started);
        results.into_iter().next().ok_or(ApiError::NotFound)
    }

    /// Patch one tour by id and return the updated document.
    ///
    /// The merged document goes back through the before-save chain (so a
    /// changed `name` refreshes the slug) and full validation, matching
    /// `runValidators` semantics.
    pub fn update(&self, id: &str, patch: &Value) -> ApiResult<Value> {
        let started = Instant::now();
        let mut query = Self::id_query(id);
        self.hooks.run_before_find("findByIdAndUpdate", &mut query)?;

        let results = self.store.find(&query)?;
        self.hooks.run_after_find("findByIdAndUpdate", &results, started);
        let current = results.into_iter().next().ok_or(ApiError::NotFound)?;

        let mut merged = merge_patch(current, patch)?;
        self.hooks.run_before_save("save", &mut merged)?;
        tour::validate(&mut merged)?;

        let mut updated = self
            .store
            .update_by_id(id, &merged)?
            .ok_or(ApiError::NotFound)?;
        self.hooks.run_after_save("save", &mut updated)?;
        Ok(updated)
    }

    /// Delete one tour by id. Hidden documents look absent here too.
    pub fn delete(&self, id: &str) -> ApiResult<()> {
        let started = Instant::now();
        let mut query = Self::id_query(id);
        self.hooks.run_before_find("findByIdAndDelete", &mut query)?;

        let results = self.store.find(&query)?;
        self.hooks.run_after_find("findByIdAndDelete", &results, started);
        if results.is_empty() {
            return Err(ApiError::NotFound);
        }

        if !self.store.delete_by_id(id)? {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    /// Direct id lookup, bypassing projection but not existence
    pub fn get_raw(&self, id: &str) -> ApiResult<Value> {
        self.store.find_by_id(id)?.ok_or(ApiError::NotFound)
    }

    fn id_query(id: &str) -> QueryDescriptor {
        let mut filter = Map::new();
        filter.insert("_id".to_string(), Value::String(id.to_string()));
        QueryDescriptor {
            filter,
            sort: Vec::new(),
            projection: Projection::Exclude(Vec::new()),
            skip: 0,
            limit: 1,
            explicit_page: None,
        }
    }
}

/// Overlay patch fields onto the current document. Identity and revision
/// fields never come from the patch.
fn merge_patch(current: Value, patch: &Value) -> ApiResult<Value> {
    let Value::Object(mut fields) = current else {
        return Err(ApiError::Internal("stored document is not an object".to_string()));
    };
    let Some(patch_fields) = patch.as_object() else {
        return Err(ApiError::Validation("patch must be a JSON object".to_string()));
    };

    for (key, value) in patch_fields {
        if key == "_id" || key == "__v" {
            continue;
        }
        fields.insert(key.clone(), value.clone());
    }
    Ok(Value::Object(fields))
}
