//! sfdx-project.json parsing and default package directory resolution
//!
//! A project may declare several package directories; exactly one of them
//! must resolve to the default. The `default` key is a tri-state: unset,
//! true, or false. With a single directory the key may be omitted, but it
//! cannot be set to false (there is no alternative default). With multiple
//! directories exactly one entry must carry `default: true` - unset entries
//! never count, ambiguity must be explicit.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{DeployError, DeployResult};

/// Default project file name
pub const PROJECT_FILE: &str = "sfdx-project.json";

/// One declared package directory in `sfdx-project.json`
#[derive(Debug, Clone, Deserialize)]
pub struct PackageDirectoryEntry {
    pub path: String,
    #[serde(default)]
    pub default: Option<bool>,
}

/// Parsed `sfdx-project.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectManifest {
    #[serde(default)]
    pub package_directories: Vec<PackageDirectoryEntry>,
}

impl ProjectManifest {
    /// Load and parse a project file
    pub fn load(path: &Path) -> DeployResult<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| DeployError::InvalidManifest {
            file: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the default package directory declared by this project
    pub fn default_dir(&self) -> DeployResult<&str> {
        resolve_default_dir(&self.package_directories)
    }
}

/// Select the single default package directory from the declared entries.
///
/// Pure validation + selection; the caller decides how to report failures.
pub fn resolve_default_dir(entries: &[PackageDirectoryEntry]) -> DeployResult<&str> {
    match entries {
        [] => Err(DeployError::ManifestMissingDirectories),
        // A lone directory is the default unless it explicitly opts out.
        [only] => {
            if only.default == Some(false) {
                return Err(DeployError::NoDefaultDirectory);
            }
            Ok(&only.path)
        }
        _ => {
            let mut defaults = entries.iter().filter(|e| e.default == Some(true));
            let first = defaults.next().ok_or(DeployError::NoDefaultDirectory)?;
            if defaults.next().is_some() {
                return Err(DeployError::MultipleDefaultDirectories);
            }
            Ok(&first.path)
        }
    }
}
