//! Command implementations.

pub mod check;
pub mod encode;
pub mod list;
pub mod plan;
pub mod resolve;

use crate::cli::GlobalArgs;
use crate::config::ImportDeclConfig;
use importdecl_core::SymbolTable;
use importdecl_manifest::{ManifestError, load_into};
use std::path::PathBuf;

/// Symbol table built for one invocation, plus everything that failed to load.
pub struct Loaded {
    pub table: SymbolTable,
    pub files: usize,
    pub errors: Vec<ManifestError>,
}

/// Build the symbol table from the built-in declarations, configured
/// manifests, and `-m` paths.
pub fn load(config: &ImportDeclConfig, global: &GlobalArgs) -> anyhow::Result<Loaded> {
    let table = SymbolTable::new();
    let mut errors = Vec::new();

    if config.manifests.builtin && !global.no_builtin {
        if let Err(errs) = importdecl_feeds::register(&table) {
            errors.extend(errs);
        }
    }

    let paths: Vec<PathBuf> = config
        .manifests
        .paths
        .iter()
        .chain(&global.manifests)
        .cloned()
        .collect();

    let mut files = 0;
    if !paths.is_empty() {
        let report = load_into(&table, &paths, &config.manifests.extensions)?;
        files = report.files;
        errors.extend(report.errors);
    }

    tracing::info!(
        declarations = table.len(),
        files,
        errors = errors.len(),
        "loaded declarations"
    );
    Ok(Loaded {
        table,
        files,
        errors,
    })
}

/// Fail with every load error. Commands other than `check` refuse to work
/// from a partial table.
pub fn require_clean(loaded: &Loaded) -> anyhow::Result<()> {
    if loaded.errors.is_empty() {
        return Ok(());
    }
    let lines: Vec<String> = loaded.errors.iter().map(|e| format!("  {e}")).collect();
    anyhow::bail!(
        "{} invalid declaration(s):\n{}",
        loaded.errors.len(),
        lines.join("\n")
    )
}
