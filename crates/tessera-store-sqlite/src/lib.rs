//! SQLite backend for the tessera module catalog.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. A namespace load runs inside
//! one transaction; the catalog is never left with a partially loaded
//! namespace.

mod catalog;
mod encode;
mod schema;

pub mod error;

pub use catalog::{NamespaceLoad, SqliteCatalog};
pub use error::{Error, Result};
