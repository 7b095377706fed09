//! TOML manifests for imported-type declarations.
//!
//! A manifest is the authoring surface for declarations:
//!
//! ```toml
//! namespace = "Platform.Feeds"
//!
//! [[declaration]]
//! name = "FeedXmlIncludeFlags"
//! kind = "enum"
//! flags = true
//! attributes = ["imported", "ignore-namespace", "numeric-values"]
//! members = [
//!   { name = "None", value = 0 },
//!   { name = "CFExtensions", value = 1 },
//! ]
//! ```
//!
//! Bare declaration names are placed under the manifest's `namespace`.
//! Manifest files are parsed in parallel and registered in path order, so a
//! build sees the same winners and the same errors on every run.

use importdecl_core::{DeclError, Declaration, DeclarationSpec, SymbolTable};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default file extension for manifests.
pub const DEFAULT_EXTENSION: &str = "toml";

/// Error raised while loading a manifest. Each variant names the file.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{}: {source}", path.display())]
    Declaration { path: PathBuf, source: DeclError },
}

impl ManifestError {
    pub fn path(&self) -> &Path {
        match self {
            ManifestError::Io { path, .. }
            | ManifestError::Walk { path, .. }
            | ManifestError::Parse { path, .. }
            | ManifestError::Declaration { path, .. } => path,
        }
    }

    /// The declaration error, if this is one.
    pub fn declaration_error(&self) -> Option<&DeclError> {
        match self {
            ManifestError::Declaration { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// On-disk manifest format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Namespace for declarations whose name has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, rename = "declaration")]
    pub declarations: Vec<DeclarationSpec>,
}

impl Manifest {
    pub fn parse(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Validate every declaration. Valid ones are returned alongside every
    /// failure.
    pub fn into_declarations(self) -> (Vec<Declaration>, Vec<DeclError>) {
        let namespace = self.namespace.as_deref();
        let mut decls = Vec::with_capacity(self.declarations.len());
        let mut errors = Vec::new();
        for spec in self.declarations {
            match Declaration::from_spec(spec, namespace) {
                Ok(decl) => decls.push(decl),
                Err(e) => errors.push(e),
            }
        }
        (decls, errors)
    }
}

/// Declarations that validated, and everything that went wrong, for one source.
#[derive(Debug, Default)]
pub struct Parsed {
    pub declarations: Vec<Declaration>,
    pub errors: Vec<ManifestError>,
}

impl Parsed {
    fn failed(error: ManifestError) -> Self {
        Self {
            declarations: Vec::new(),
            errors: vec![error],
        }
    }

    /// All declarations, or every error if there was any.
    pub fn into_result(self) -> Result<Vec<Declaration>, Vec<ManifestError>> {
        if self.errors.is_empty() {
            Ok(self.declarations)
        } else {
            Err(self.errors)
        }
    }
}

/// Parse manifest text, keeping valid declarations next to the failures.
/// `origin` is only used to label errors.
pub fn parse_manifest_lenient(source: &str, origin: &Path) -> Parsed {
    let manifest = match Manifest::parse(source) {
        Ok(manifest) => manifest,
        Err(source) => {
            return Parsed::failed(ManifestError::Parse {
                path: origin.to_path_buf(),
                source,
            });
        }
    };

    let (declarations, errors) = manifest.into_declarations();
    Parsed {
        declarations,
        errors: errors
            .into_iter()
            .map(|source| ManifestError::Declaration {
                path: origin.to_path_buf(),
                source,
            })
            .collect(),
    }
}

/// Parse manifest text, failing if any declaration is invalid.
pub fn parse_manifest(source: &str, origin: &Path) -> Result<Vec<Declaration>, Vec<ManifestError>> {
    parse_manifest_lenient(source, origin).into_result()
}

/// Read and parse one manifest file, keeping valid declarations.
pub fn read_file(path: &Path) -> Parsed {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(source) => {
            return Parsed::failed(ManifestError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let parsed = parse_manifest_lenient(&source, path);
    tracing::debug!(
        path = %path.display(),
        declarations = parsed.declarations.len(),
        errors = parsed.errors.len(),
        "parsed manifest"
    );
    parsed
}

/// Read and parse one manifest file, failing if any declaration is invalid.
pub fn load_file(path: &Path) -> Result<Vec<Declaration>, Vec<ManifestError>> {
    read_file(path).into_result()
}

/// Expand `paths` into manifest files: files are taken as-is, directories are
/// walked for files with one of `extensions`. Result is sorted and deduplicated.
pub fn discover(paths: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>, ManifestError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.exists() {
            return Err(ManifestError::Io {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            });
        }
        for entry in walkdir::WalkDir::new(path).follow_links(true) {
            let entry = entry.map_err(|source| ManifestError::Walk {
                path: path.clone(),
                source,
            })?;
            if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want == ext))
}

/// Outcome of loading manifests into a table.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub files: usize,
    pub registered: usize,
    pub errors: Vec<ManifestError>,
}

impl LoadReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Discover, parse (in parallel), and register manifests into `table`.
///
/// Every valid declaration is registered and every failure is reported,
/// including invalid declarations that share a file with valid ones.
pub fn load_into(
    table: &SymbolTable,
    paths: &[PathBuf],
    extensions: &[String],
) -> Result<LoadReport, ManifestError> {
    let files = discover(paths, extensions)?;
    tracing::debug!(files = files.len(), "discovered manifests");

    let parsed: Vec<(PathBuf, Parsed)> = files
        .par_iter()
        .map(|path| (path.clone(), read_file(path)))
        .collect();

    let mut report = LoadReport {
        files: files.len(),
        ..Default::default()
    };

    // registration stays in path order
    for (path, parsed) in parsed {
        report.errors.extend(parsed.errors);
        for decl in parsed.declarations {
            match table.register(decl) {
                Ok(_) => report.registered += 1,
                Err(source) => report.errors.push(ManifestError::Declaration {
                    path: path.clone(),
                    source,
                }),
            }
        }
    }

    Ok(report)
}

/// JSON schema of the manifest format.
#[cfg(feature = "schema")]
pub fn manifest_schema() -> schemars::Schema {
    schemars::schema_for!(Manifest)
}
