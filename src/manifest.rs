//! Serde model of the package manifest (`package.json`).

use std::path::Path;

use serde::Deserialize;

use crate::error::{ManifestError, Result};

/// The slice of `package.json` this subsystem reads.
///
/// Unknown fields are ignored and the file is never written back here; the
/// only manifest rewrite is performed by the `yarn version` subprocess.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    /// Package name, possibly scoped (`@scope/name`)
    #[serde(default)]
    pub name: Option<String>,
    /// Current manifest version
    #[serde(default)]
    pub version: Option<String>,
    /// Publish-time overrides
    #[serde(default, rename = "publishConfig")]
    pub publish_config: Option<PublishConfig>,
}

/// `publishConfig` block of the manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublishConfig {
    /// Target registry override
    #[serde(default)]
    pub registry: Option<String>,
}

impl PackageManifest {
    /// Load and parse the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not valid JSON.
    pub async fn load(path: &Path) -> Result<Self> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ManifestError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
        serde_json::from_str(&content).map_err(|source| {
            ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            }
            .into()
        })
    }

    /// Scope segment of a scoped package name (`@scope/name` -> `@scope`).
    pub fn scope(&self) -> Option<&str> {
        let name = self.name.as_deref()?;
        if !name.starts_with('@') {
            return None;
        }
        name.split('/').next()
    }
}
