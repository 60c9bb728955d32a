//! `tessera` — catalog CLI for module manifests.
//!
//! `tessera load` walks a directory whose subdirectories are namespaces,
//! decodes every YAML manifest and loads each namespace into the catalog as
//! one transaction. `list` and `show` inspect what is stored.
//!
//! # Usage
//!
//! ```
//! tessera load --root ./manifests --version 1.4.0
//! tessera load --root ./manifests --version 1.5.0 --dev
//! tessera list agora:story-beats
//! tessera show agora:story-beats@v1.4.0
//! ```

mod run;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tessera_core::module::ModuleRef;
use tessera_store_sqlite::SqliteCatalog;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "tessera", about = "Module catalog for tessera manifests")]
struct Cli {
  /// Path to the SQLite catalog file (overrides config file and env).
  #[arg(long, value_name = "FILE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Load every namespace under a manifest root into the catalog.
  Load {
    /// Directory whose immediate subdirectories are namespaces.
    #[arg(long, value_name = "DIR")]
    root: PathBuf,

    /// Release version label applied to every module.
    #[arg(long, value_name = "X.Y.Z")]
    version: Option<String>,

    /// Development mode: replace drafts already carrying the target version.
    #[arg(long)]
    dev: bool,
  },

  /// List stored versions for a module identity (`namespace:id`).
  List { module: String },

  /// Print one stored module as JSON (`namespace:id@vX.Y.Z`).
  Show { module: String },
}

// ─── Configuration ────────────────────────────────────────────────────────────

/// Settings resolved from `tessera.toml` and `TESSERA_*` variables; CLI
/// flags take precedence over both.
#[derive(Debug, Default, Deserialize)]
struct Settings {
  store_path: Option<PathBuf>,
  version:    Option<String>,
  #[serde(default)]
  dev_mode:   bool,
}

fn load_settings() -> anyhow::Result<Settings> {
  config::Config::builder()
    .add_source(config::File::with_name("tessera").required(false))
    .add_source(config::Environment::with_prefix("TESSERA"))
    .build()
    .context("failed to read configuration")?
    .try_deserialize()
    .context("failed to deserialise settings")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = load_settings()?;

  let store_path = cli
    .store
    .or(settings.store_path)
    .unwrap_or_else(|| PathBuf::from("tessera.db"));
  let catalog = SqliteCatalog::open(&store_path)
    .await
    .with_context(|| format!("failed to open catalog at {store_path:?}"))?;

  match cli.command {
    Command::Load { root, version, dev } => {
      let version = version.or(settings.version).context(
        "a release version is required (--version or TESSERA_VERSION)",
      )?;
      let dev_mode = dev || settings.dev_mode;

      let report = run::load_all(&catalog, &root, &version, dev_mode).await?;
      report.log();
      if report.failed() {
        std::process::exit(1);
      }
    }

    Command::List { module } => {
      let coordinate: ModuleRef = module.parse()?;
      let versions = catalog
        .list_versions(&coordinate.namespace, &coordinate.id)
        .await?;

      if versions.is_empty() {
        println!("no versions stored for {coordinate}");
      }
      for info in versions {
        println!("v{}\t{}", info.version, info.created_at.to_rfc3339());
      }
    }

    Command::Show { module } => {
      let coordinate: ModuleRef = module.parse()?;
      let version = coordinate
        .version
        .clone()
        .context("a version is required (namespace:id@vX.Y.Z)")?;

      let stored = catalog
        .select_module(&coordinate.namespace, &coordinate.id, &version)
        .await?
        .with_context(|| format!("{coordinate} is not in the catalog"))?;
      println!("{}", serde_json::to_string_pretty(&stored)?);
    }
  }

  Ok(())
}
