//! SQL schema for the tessera SQLite catalog.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per released module version. The triple is the natural key;
-- uniqueness here is the authoritative guard against duplicate releases.
CREATE TABLE IF NOT EXISTS modules (
    namespace   TEXT NOT NULL,
    id          TEXT NOT NULL,
    version     TEXT NOT NULL,
    description TEXT NOT NULL,
    schema_json TEXT NOT NULL,   -- canonical JSON form of the content schema
    ui_json     TEXT NOT NULL,   -- serialized UI descriptor
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC
    PRIMARY KEY (namespace, id, version)
);

CREATE INDEX IF NOT EXISTS modules_identity_idx ON modules(namespace, id);

PRAGMA user_version = 1;
";
