//! Lifecycle hook behavior across the service: slug derivation, creation
//! timestamps, visibility narrowing, and veto semantics.

use std::collections::HashMap;
use std::time::Instant;

use serde_json::{json, Value};

use tourdb::errors::ApiError;
use tourdb::hooks::timing::QueryTimer;
use tourdb::hooks::visibility::VisibilityHook;
use tourdb::hooks::{DocumentHook, HookError, HookResult, HookSet, Phase};
use tourdb::query::translate;
use tourdb::service::TourService;
use tourdb::store::{InMemoryStore, ResourceStore};

fn tour(name: &str) -> Value {
    json!({
        "name": name,
        "duration": 5,
        "maxGroupSize": 10,
        "difficulty": "easy",
        "price": 400,
        "summary": "summary",
        "imageCover": "cover.jpg"
    })
}

fn no_params() -> HashMap<String, String> {
    HashMap::new()
}

#[test]
fn slug_is_derived_on_create_and_refreshed_on_update() {
    let service = TourService::new(InMemoryStore::new());

    let created = service.create(tour("Sahara Trek!!")).unwrap();
    assert_eq!(created["slug"], "sahara-trek");

    let id = created["_id"].as_str().unwrap();
    let updated = service
        .update(id, &json!({"name": "Atlas Traverse (2026)"}))
        .unwrap();
    assert_eq!(updated["slug"], "atlas-traverse-2026");
}

#[test]
fn created_at_is_set_once() {
    let service = TourService::new(InMemoryStore::new());

    let created = service.create(tour("Once")).unwrap();
    let id = created["_id"].as_str().unwrap();

    let updated = service.update(id, &json!({"price": 500})).unwrap();

    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[test]
fn secret_tours_are_invisible_to_list_and_id_reads() {
    let service = TourService::new(InMemoryStore::new());
    service.create(tour("Public")).unwrap();
    let mut secret = tour("Secret");
    secret["secretTour"] = json!(true);
    let secret = service.create(secret).unwrap();
    let secret_id = secret["_id"].as_str().unwrap();

    let listed = service.list(&no_params()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "Public");

    assert!(matches!(service.get(secret_id), Err(ApiError::NotFound)));
}

#[test]
fn explicit_secret_filter_is_anded_not_overridden() {
    let service = TourService::new(InMemoryStore::new());
    let mut secret = tour("Secret");
    secret["secretTour"] = json!(true);
    service.create(secret).unwrap();

    let params: HashMap<String, String> =
        [("secretTour".to_string(), "true".to_string())].into();

    assert!(service.list(&params).unwrap().is_empty());
}

#[test]
fn making_a_tour_secret_hides_it_from_then_on() {
    let service = TourService::new(InMemoryStore::new());
    let created = service.create(tour("Going Dark")).unwrap();
    let id = created["_id"].as_str().unwrap();

    service.update(id, &json!({"secretTour": true})).unwrap();

    assert!(service.list(&no_params()).unwrap().is_empty());
    assert!(matches!(service.get(id), Err(ApiError::NotFound)));
}

#[test]
fn hook_veto_aborts_without_partial_persistence() {
    struct RejectDiscounts;
    impl DocumentHook for RejectDiscounts {
        fn run(&self, document: &mut Value) -> HookResult {
            if document.get("priceDiscount").is_some() {
                return Err(HookError::new("discounts are disabled"));
            }
            Ok(())
        }
    }

    let hooks = HookSet::new().on_save(Phase::Before, RejectDiscounts);
    let service = TourService::with_hooks(InMemoryStore::new(), hooks);

    let mut discounted = tour("Discounted");
    discounted["priceDiscount"] = json!(50);

    let err = service.create(discounted).unwrap_err();
    assert!(matches!(err, ApiError::HookAbort(_)));
    assert!(service.list(&no_params()).unwrap().is_empty());
}

#[test]
fn user_style_narrowing_hides_inactive_documents() {
    // The narrowing mechanism is resource-agnostic: wire the `active`
    // variant straight onto a store of user-like documents.
    let store = InMemoryStore::new();
    store.create(json!({"name": "ada", "active": true})).unwrap();
    store.create(json!({"name": "bob", "active": false})).unwrap();
    store.create(json!({"name": "cleo"})).unwrap();

    let hooks = HookSet::new()
        .before_find(VisibilityHook::hide_unflagged("active"))
        .after_find(QueryTimer);

    let mut query = translate(&no_params());
    hooks.run_before_find("find", &mut query).unwrap();
    let started = Instant::now();
    let found = store.find(&query).unwrap();
    hooks.run_after_find("find", &found, started);

    let names: Vec<&str> = found.iter().filter_map(|d| d["name"].as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"ada"));
    // A document that never set the flag is visible
    assert!(names.contains(&"cleo"));
    assert!(!names.contains(&"bob"));
}
