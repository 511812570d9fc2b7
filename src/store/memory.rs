//! In-memory resource store.
//!
//! Backs the standalone server and the test suite. Documents live in a
//! `Vec` behind an `RwLock`; `name` is enforced unique the way the real
//! engine's unique index would.

use std::cmp::Ordering;
use std::sync::RwLock;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::query::{Projection, QueryDescriptor, SortKey};

use super::{eval, ResourceStore, StoreError, StoreResult};

/// Vec-backed document store with a unique index on `name`
#[derive(Default)]
pub struct InMemoryStore {
    documents: RwLock<Vec<Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Vec<Value>>> {
        self.documents
            .read()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Vec<Value>>> {
        self.documents
            .write()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))
    }

    fn apply_sort(documents: &mut [Value], sort: &[SortKey]) {
        if sort.is_empty() {
            return;
        }
        documents.sort_by(|a, b| {
            for key in sort {
                let ord = match (a.get(&key.field), b.get(&key.field)) {
                    (Some(a_val), Some(b_val)) => {
                        eval::compare_values(a_val, b_val).unwrap_or(Ordering::Equal)
                    }
                    _ => Ordering::Equal,
                };
                let ord = if key.ascending { ord } else { ord.reverse() };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
    }

    fn apply_projection(documents: Vec<Value>, projection: &Projection) -> Vec<Value> {
        documents
            .into_iter()
            .map(|document| {
                let Value::Object(fields) = document else {
                    return document;
                };
                let projected: Map<String, Value> = match projection {
                    Projection::Include(included) => fields
                        .into_iter()
                        // the id always travels with an inclusion list
                        .filter(|(key, _)| key == "_id" || included.contains(key))
                        .collect(),
                    Projection::Exclude(excluded) => fields
                        .into_iter()
                        .filter(|(key, _)| !excluded.contains(key))
                        .collect(),
                };
                Value::Object(projected)
            })
            .collect()
    }

    fn id_of(document: &Value) -> Option<&str> {
        document.get("_id").and_then(Value::as_str)
    }

    /// Unique-index check on `name`, skipping the document itself on update
    fn check_unique_name(
        documents: &[Value],
        candidate: &Value,
        own_id: Option<&str>,
    ) -> StoreResult<()> {
        let Some(name) = candidate.get("name") else {
            return Ok(());
        };
        let clash = documents.iter().any(|existing| {
            Self::id_of(existing) != own_id && existing.get("name") == Some(name)
        });
        if clash {
            return Err(StoreError::Duplicate("name".to_string()));
        }
        Ok(())
    }
}

impl ResourceStore for InMemoryStore {
    fn find(&self, query: &QueryDescriptor) -> StoreResult<Vec<Value>> {
        let mut matched = Vec::new();
        {
            let documents = self.read()?;
            for document in documents.iter() {
                if eval::matches_filter(document, &query.filter)? {
                    matched.push(document.clone());
                }
            }
        }

        Self::apply_sort(&mut matched, &query.sort);

        let page: Vec<Value> = matched
            .into_iter()
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .collect();

        Ok(Self::apply_projection(page, &query.projection))
    }

    fn count(&self, filter: &Map<String, Value>) -> StoreResult<u64> {
        let documents = self.read()?;
        let mut total = 0;
        for document in documents.iter() {
            if eval::matches_filter(document, filter)? {
                total += 1;
            }
        }
        Ok(total)
    }

    fn create(&self, mut document: Value) -> StoreResult<Value> {
        let mut documents = self.write()?;
        Self::check_unique_name(&documents, &document, None)?;

        if let Some(fields) = document.as_object_mut() {
            fields.insert(
                "_id".to_string(),
                Value::String(Uuid::new_v4().to_string()),
            );
            fields.insert("__v".to_string(), Value::Number(0.into()));
        }

        documents.push(document.clone());
        Ok(document)
    }

    fn find_by_id(&self, id: &str) -> StoreResult<Option<Value>> {
        let documents = self.read()?;
        Ok(documents
            .iter()
            .find(|document| Self::id_of(document) == Some(id))
            .cloned())
    }

    fn update_by_id(&self, id: &str, document: &Value) -> StoreResult<Option<Value>> {
        let mut documents = self.write()?;
        Self::check_unique_name(&documents, document, Some(id))?;

        let Some(existing) = documents
            .iter_mut()
            .find(|existing| Self::id_of(existing) == Some(id))
        else {
            return Ok(None);
        };

        if let (Some(existing_fields), Some(new_fields)) =
            (existing.as_object_mut(), document.as_object())
        {
            let id_value = existing_fields.get("_id").cloned();
            let revision = existing_fields.get("__v").cloned();
            *existing_fields = new_fields.clone();
            if let Some(id_value) = id_value {
                existing_fields.insert("_id".to_string(), id_value);
            }
            if let Some(revision) = revision {
                existing_fields.insert("__v".to_string(), revision);
            }
        }

        Ok(Some(existing.clone()))
    }

    fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        let mut documents = self.write()?;
        let before = documents.len();
        documents.retain(|document| Self::id_of(document) != Some(id));
        Ok(documents.len() < before)
    }
}
