//! Core types and trait definitions for the tessera module catalog.
//!
//! This crate is deliberately free of database and filesystem dependencies.
//! All other crates depend on it; it depends on nothing heavier than serde.

pub mod error;
pub mod load;
pub mod module;
pub mod schema;
pub mod store;

pub use error::{Error, Result};
