//! Shared types: the canonical model, errors and the schema trait.

pub mod error;
pub mod models;
pub mod schema;
