//! tourdb - a small tour-catalog HTTP API with a Mongo-style query surface
//!
//! The interesting parts live in two modules: `query`, which turns an
//! untyped query-string map into a validated store query, and `hooks`, the
//! explicit lifecycle hook chain that runs around every save and
//! find-family operation (slug derivation, creation timestamps, visibility
//! narrowing, query timing). Everything else wires those into a REST
//! surface backed by a pluggable document store.

pub mod cli;
pub mod errors;
pub mod hooks;
pub mod model;
pub mod observability;
pub mod query;
pub mod rest;
pub mod service;
pub mod store;
