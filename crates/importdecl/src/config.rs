//! Configuration loaded from `.importdecl/config.toml`.
//!
//! Example:
//! ```toml
//! [manifests]
//! paths = ["decls"]          # files or directories, relative to the working directory
//! extensions = ["toml"]
//! builtin = true             # include the built-in Feeds declarations
//!
//! [pretty]
//! colors = "auto"
//! ```

use importdecl_manifest::DEFAULT_EXTENSION;
use importdecl_output::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config location, relative to the working directory.
pub const CONFIG_PATH: &str = ".importdecl/config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Where declaration manifests come from.
#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestsConfig {
    /// Manifest files or directories to load.
    pub paths: Vec<PathBuf>,
    /// File extensions treated as manifests when walking directories.
    pub extensions: Vec<String>,
    /// Include the built-in Feeds declarations.
    pub builtin: bool,
}

impl Default for ManifestsConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            builtin: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ImportDeclConfig {
    pub manifests: ManifestsConfig,
    pub pretty: PrettyConfig,
}

impl ImportDeclConfig {
    pub fn parse(source: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given (it must exist), otherwise `CONFIG_PATH` under
    /// `root` if present, otherwise defaults.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = root.join(CONFIG_PATH);
                if !path.exists() {
                    tracing::debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        let source = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::parse(&source, &path)
    }
}
