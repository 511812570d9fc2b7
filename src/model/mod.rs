//! Resource schemas.

pub mod tour;
