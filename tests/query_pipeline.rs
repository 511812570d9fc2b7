//! End-to-end checks of the query-translation pipeline running against the
//! in-memory store through the service.

use std::collections::HashMap;

use serde_json::{json, Value};

use tourdb::errors::ApiError;
use tourdb::service::TourService;
use tourdb::store::InMemoryStore;

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn tour(name: &str, price: i64, duration: i64, difficulty: &str) -> Value {
    json!({
        "name": name,
        "duration": duration,
        "maxGroupSize": 10,
        "difficulty": difficulty,
        "price": price,
        "summary": "summary",
        "imageCover": "cover.jpg"
    })
}

fn seeded() -> TourService<InMemoryStore> {
    let service = TourService::new(InMemoryStore::new());
    service.create(tour("City Stroll", 150, 2, "easy")).unwrap();
    service.create(tour("Forest Hiker", 400, 5, "easy")).unwrap();
    service.create(tour("Sea Explorer", 700, 7, "medium")).unwrap();
    service.create(tour("Peak Climber", 1200, 10, "difficult")).unwrap();
    service
}

#[test]
fn filter_with_bracket_operator() {
    let service = seeded();

    let found = service
        .list(&params(&[("price[gte]", "400"), ("limit", "10")]))
        .unwrap();

    assert_eq!(found.len(), 3);
    assert!(found.iter().all(|t| t["price"].as_i64().unwrap() >= 400));
}

#[test]
fn equality_filter_on_plain_key() {
    let service = seeded();

    let found = service
        .list(&params(&[("difficulty", "easy"), ("limit", "10")]))
        .unwrap();

    assert_eq!(found.len(), 2);
}

#[test]
fn combined_range_on_one_field() {
    let service = seeded();

    let found = service
        .list(&params(&[
            ("duration[gte]", "5"),
            ("duration[lt]", "10"),
            ("limit", "10"),
        ]))
        .unwrap();

    assert_eq!(found.len(), 2);
}

#[test]
fn sort_with_direction_prefixes() {
    let service = seeded();

    let found = service
        .list(&params(&[("sort", "difficulty,-price"), ("limit", "10")]))
        .unwrap();

    // Ties on difficulty break by price descending
    assert_eq!(found[0]["name"], "Peak Climber");
    assert_eq!(found[1]["name"], "Forest Hiker");
    assert_eq!(found[2]["name"], "City Stroll");
    assert_eq!(found[3]["name"], "Sea Explorer");
}

#[test]
fn explicit_field_selection() {
    let service = seeded();

    let found = service
        .list(&params(&[("fields", "name,price"), ("limit", "1")]))
        .unwrap();

    let fields = found[0].as_object().unwrap();
    assert!(fields.contains_key("name"));
    assert!(fields.contains_key("price"));
    assert!(!fields.contains_key("duration"));
    assert!(!fields.contains_key("summary"));
}

#[test]
fn default_limit_is_three() {
    let service = seeded();

    let found = service.list(&params(&[])).unwrap();

    assert_eq!(found.len(), 3);
}

#[test]
fn default_projection_hides_revision_field() {
    let service = seeded();

    let found = service.list(&params(&[])).unwrap();

    assert!(found.iter().all(|t| t.get("__v").is_none()));
}

#[test]
fn explicit_page_past_the_end_is_out_of_range() {
    let service = seeded();

    let err = service
        .list(&params(&[("page", "5"), ("limit", "10")]))
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::PageOutOfRange { skip: 40, total: 4 }
    ));
}

#[test]
fn extreme_page_is_out_of_range_not_wrapped() {
    let service = seeded();

    // page * limit past u64::MAX must still read as "past the end",
    // never as a small wrapped skip that returns data
    let err = service
        .list(&params(&[("page", "18446744073709551615"), ("limit", "10")]))
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::PageOutOfRange {
            skip: u64::MAX,
            total: 4
        }
    ));
}

#[test]
fn short_final_page_is_still_valid() {
    let service = seeded();

    let found = service
        .list(&params(&[("page", "2"), ("limit", "3")]))
        .unwrap();

    assert_eq!(found.len(), 1);
}

#[test]
fn defaulted_page_never_raises_out_of_range() {
    let service = TourService::new(InMemoryStore::new());

    // Empty store: skip 0 >= total 0, but page was not supplied
    assert!(service.list(&params(&[])).unwrap().is_empty());
    assert!(service
        .list(&params(&[("limit", "50")]))
        .unwrap()
        .is_empty());

    // Supplying page=1 on the empty store does raise
    let err = service.list(&params(&[("page", "1")])).unwrap_err();
    assert!(matches!(err, ApiError::PageOutOfRange { .. }));
}

#[test]
fn unknown_dollar_operator_is_rejected_by_the_store() {
    let service = seeded();

    let err = service
        .list(&params(&[("price[ne]", "400"), ("limit", "10")]))
        .unwrap_err();

    // `ne` passes through the rewriter untouched and the store refuses it
    assert!(matches!(err, ApiError::InvalidFilter(_)));
}
