//! [`SqliteCatalog`] — the SQLite implementation of the version store.

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tessera_core::{
  load::load_module,
  module::{ModuleDefinition, StoredModule, VersionInfo},
  store::VersionStore,
};

use crate::{
  Error, Result,
  encode::{RawModule, decode_dt, encode_dt, encode_schema, encode_ui},
  schema::SCHEMA,
};

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// A module catalog backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteCatalog {
  conn: tokio_rusqlite::Connection,
}

/// One namespace's worth of definitions, loaded as a single transaction.
#[derive(Debug, Clone)]
pub struct NamespaceLoad {
  pub namespace: String,
  /// Definitions in discovery order.
  pub modules:   Vec<ModuleDefinition>,
  /// Release version label applied to every module in the batch.
  pub version:   String,
  pub dev_mode:  bool,
}

impl SqliteCatalog {
  /// Open (or create) a catalog at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let catalog = Self { conn };
    catalog.init_schema().await?;
    Ok(catalog)
  }

  /// Open an in-memory catalog — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let catalog = Self { conn };
    catalog.init_schema().await?;
    Ok(catalog)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Load every module of one namespace inside one transaction.
  ///
  /// Definitions are loaded in the supplied order. The first failure rolls
  /// the whole namespace back and is attributed to the failing module's id;
  /// on success every row is committed together.
  pub async fn load_namespace(
    &self,
    request: NamespaceLoad,
  ) -> Result<Vec<StoredModule>> {
    let loaded = self
      .conn
      .call(move |conn| Ok(load_namespace_tx(conn, &request)))
      .await?;
    loaded
  }

  /// Point lookup, outside any batch transaction.
  pub async fn select_module(
    &self,
    namespace: &str,
    id: &str,
    version: &str,
  ) -> Result<Option<StoredModule>> {
    let namespace = namespace.to_owned();
    let id = id.to_owned();
    let version = version.to_owned();

    let row = self
      .conn
      .call(move |conn| {
        let mut store = ConnStore { conn };
        Ok(store.select(&namespace, &id, &version))
      })
      .await?;
    row
  }

  /// All stored versions for an identity, newest first.
  pub async fn list_versions(
    &self,
    namespace: &str,
    id: &str,
  ) -> Result<Vec<VersionInfo>> {
    let namespace = namespace.to_owned();
    let id = id.to_owned();

    let versions = self
      .conn
      .call(move |conn| {
        let mut store = ConnStore { conn };
        Ok(store.list_versions(&namespace, &id))
      })
      .await?;
    versions
  }
}

/// Run one namespace load inside a transaction on the SQLite thread.
fn load_namespace_tx(
  conn: &mut rusqlite::Connection,
  request: &NamespaceLoad,
) -> Result<Vec<StoredModule>> {
  let tx = conn.transaction()?;
  let mut loaded = Vec::with_capacity(request.modules.len());

  {
    let mut store = ConnStore { conn: &tx };
    for def in &request.modules {
      let row = load_module(&mut store, def, &request.version, request.dev_mode)
        .map_err(|err| Error::Module {
          namespace: request.namespace.clone(),
          id:        def.id.clone(),
          source:    Box::new(err),
        })?;
      loaded.push(row);
    }
  }

  tx.commit()?;
  Ok(loaded)
}

// ─── VersionStore impl ───────────────────────────────────────────────────────

/// [`VersionStore`] over a borrowed SQLite connection. The namespace driver
/// instantiates it over its transaction; the read conveniences above over
/// the plain connection.
struct ConnStore<'c> {
  conn: &'c rusqlite::Connection,
}

impl VersionStore for ConnStore<'_> {
  type Error = Error;

  fn insert(
    &mut self,
    def: &ModuleDefinition,
    version: &str,
  ) -> Result<StoredModule> {
    let row = StoredModule {
      namespace:   def.namespace.clone(),
      id:          def.id.clone(),
      version:     version.to_owned(),
      description: def.description.clone(),
      schema:      def.schema.clone(),
      ui:          def.ui.clone(),
      created_at:  Utc::now(),
    };

    let result = self.conn.execute(
      "INSERT INTO modules (
         namespace, id, version, description, schema_json, ui_json, created_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
      rusqlite::params![
        row.namespace,
        row.id,
        row.version,
        row.description,
        encode_schema(&row.schema)?,
        encode_ui(&row.ui)?,
        encode_dt(row.created_at),
      ],
    );

    match result {
      Ok(_) => Ok(row),
      Err(err) if is_unique_violation(&err) => Err(
        tessera_core::Error::AlreadyExists {
          namespace: row.namespace,
          id:        row.id,
          version:   row.version,
        }
        .into(),
      ),
      Err(err) => Err(err.into()),
    }
  }

  fn delete(&mut self, namespace: &str, id: &str, version: &str) -> Result<()> {
    self.conn.execute(
      "DELETE FROM modules WHERE namespace = ?1 AND id = ?2 AND version = ?3",
      rusqlite::params![namespace, id, version],
    )?;
    Ok(())
  }

  fn select(
    &mut self,
    namespace: &str,
    id: &str,
    version: &str,
  ) -> Result<Option<StoredModule>> {
    let raw: Option<RawModule> = self
      .conn
      .query_row(
        "SELECT namespace, id, version, description, schema_json, ui_json, created_at
         FROM modules
         WHERE namespace = ?1 AND id = ?2 AND version = ?3",
        rusqlite::params![namespace, id, version],
        |row| {
          Ok(RawModule {
            namespace:   row.get(0)?,
            id:          row.get(1)?,
            version:     row.get(2)?,
            description: row.get(3)?,
            schema_json: row.get(4)?,
            ui_json:     row.get(5)?,
            created_at:  row.get(6)?,
          })
        },
      )
      .optional()?;

    raw.map(RawModule::into_module).transpose()
  }

  fn list_versions(
    &mut self,
    namespace: &str,
    id: &str,
  ) -> Result<Vec<VersionInfo>> {
    let mut stmt = self.conn.prepare(
      "SELECT version, created_at FROM modules
       WHERE namespace = ?1 AND id = ?2
       ORDER BY created_at DESC, version DESC",
    )?;

    let rows = stmt
      .query_map(rusqlite::params![namespace, id], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    rows
      .into_iter()
      .map(|(version, created_at)| {
        Ok(VersionInfo {
          version,
          created_at: decode_dt(&created_at)?,
        })
      })
      .collect()
  }
}

/// SQLite reports a duplicate `(namespace, id, version)` triple as a
/// constraint violation on the primary key.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err.sqlite_error_code(),
    Some(rusqlite::ErrorCode::ConstraintViolation)
  )
}
