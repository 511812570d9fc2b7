//! # Query Translation
//!
//! Converts the raw query-string map of a list request into a validated
//! store query: filter document, sort keys, field projection, and
//! skip/limit pagination. Translation is pure and deterministic; nothing
//! here touches the store.

pub mod params;
pub mod rewrite;
pub mod translate;

pub use params::{RawParameters, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use rewrite::rewrite_operators;
pub use translate::{translate, Projection, QueryDescriptor, SortKey};
