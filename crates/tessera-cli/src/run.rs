//! Manifest discovery and the multi-namespace load run.

use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::Context as _;
use tessera_store_sqlite::{NamespaceLoad, SqliteCatalog};

// ─── Discovery ───────────────────────────────────────────────────────────────

/// One namespace's manifest files, in discovery order.
pub struct NamespaceSources {
  pub namespace: String,
  pub files:     Vec<PathBuf>,
}

/// Every immediate subdirectory of `root` is a namespace; its `*.yaml` /
/// `*.yml` files, sorted by name, are that namespace's manifests.
pub fn discover(root: &Path) -> anyhow::Result<Vec<NamespaceSources>> {
  let mut entries: Vec<_> = fs::read_dir(root)
    .with_context(|| format!("failed to read manifest root {root:?}"))?
    .collect::<Result<_, _>>()?;
  entries.sort_by_key(|entry| entry.file_name());

  let mut namespaces = Vec::new();
  for entry in entries {
    if !entry.file_type()?.is_dir() {
      continue;
    }
    let namespace = entry.file_name().to_string_lossy().into_owned();

    let mut files: Vec<PathBuf> = fs::read_dir(entry.path())?
      .collect::<Result<Vec<_>, _>>()?
      .into_iter()
      .map(|file| file.path())
      .filter(|path| {
        matches!(
          path.extension().and_then(|ext| ext.to_str()),
          Some("yaml" | "yml")
        )
      })
      .collect();
    files.sort();

    if !files.is_empty() {
      namespaces.push(NamespaceSources { namespace, files });
    }
  }

  Ok(namespaces)
}

// ─── Run report ──────────────────────────────────────────────────────────────

/// Outcome of one namespace's load attempt.
pub struct NamespaceOutcome {
  pub namespace: String,
  pub result:    anyhow::Result<usize>,
}

/// Per-namespace outcomes of a whole run.
pub struct LoadReport {
  pub outcomes:    Vec<NamespaceOutcome>,
  pub interrupted: bool,
}

impl LoadReport {
  pub fn failed(&self) -> bool {
    self.outcomes.iter().any(|outcome| outcome.result.is_err())
  }

  pub fn log(&self) {
    for outcome in &self.outcomes {
      match &outcome.result {
        Ok(count) => tracing::info!(
          namespace = %outcome.namespace,
          modules = count,
          "namespace loaded"
        ),
        Err(err) => tracing::error!(
          namespace = %outcome.namespace,
          "namespace failed: {err:#}"
        ),
      }
    }
    if self.interrupted {
      tracing::warn!("run interrupted; remaining namespaces were skipped");
    }
  }
}

// ─── Run ─────────────────────────────────────────────────────────────────────

/// Load every namespace under `root`.
///
/// Namespaces are independent: a failed namespace rolls back its own
/// transaction and the run continues with its siblings. Ctrl-C stops the
/// run; the namespace in flight either commits fully or not at all.
pub async fn load_all(
  catalog: &SqliteCatalog,
  root: &Path,
  version: &str,
  dev_mode: bool,
) -> anyhow::Result<LoadReport> {
  let namespaces = discover(root)?;
  if namespaces.is_empty() {
    tracing::warn!(root = %root.display(), "no module manifests found");
  }

  let mut report = LoadReport {
    outcomes:    Vec::new(),
    interrupted: false,
  };

  for sources in namespaces {
    let namespace = sources.namespace.clone();
    tracing::info!(namespace = %namespace, "loading namespace");

    tokio::select! {
      result = load_namespace(catalog, sources, version, dev_mode) => {
        report.outcomes.push(NamespaceOutcome { namespace, result });
      }
      _ = tokio::signal::ctrl_c() => {
        report.interrupted = true;
        break;
      }
    }
  }

  Ok(report)
}

/// Decode one namespace's manifests, then load them as one transaction.
///
/// Decoding happens before the transaction opens: a namespace with any
/// undecodable manifest stores nothing.
async fn load_namespace(
  catalog: &SqliteCatalog,
  sources: NamespaceSources,
  version: &str,
  dev_mode: bool,
) -> anyhow::Result<usize> {
  let mut modules = Vec::with_capacity(sources.files.len());
  for path in &sources.files {
    let raw = fs::read_to_string(path)
      .with_context(|| format!("failed to read {}", path.display()))?;
    let def = tessera_manifest::decode(&raw)
      .with_context(|| format!("failed to decode {}", path.display()))?;
    modules.push(def);
  }

  let loaded = catalog
    .load_namespace(NamespaceLoad {
      namespace: sources.namespace.clone(),
      modules,
      version: version.to_owned(),
      dev_mode,
    })
    .await?;

  for row in &loaded {
    tracing::debug!(module = %row.coordinate(), "module loaded");
  }

  Ok(loaded.len())
}
