//! Error types for sfdeploy
//!
//! Uses `thiserror` for library errors; the binary maps variants to exit
//! codes (resolver errors exit 1, `DeploymentFailed` exits with the child's
//! own code).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sfdeploy operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Main error type for sfdeploy operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// The project file declares no package directories
    #[error("package directories not specified in the project file")]
    ManifestMissingDirectories,

    /// No directory resolves to the default package directory
    #[error("default package directory not found - set default to true or remove the default key")]
    NoDefaultDirectory,

    /// More than one directory claims to be the default
    #[error("there can only be 1 default package directory")]
    MultipleDefaultDirectories,

    /// The external deploy command exited with a non-zero status
    #[error("deploy command failed with exit code {code}")]
    DeploymentFailed { code: i32 },

    /// Project file is not valid JSON
    #[error("invalid project file {file}: {source}")]
    InvalidManifest {
        file: PathBuf,
        source: serde_json::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeployError {
    /// Exit code the program should terminate with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployError::DeploymentFailed { code } => *code,
            _ => 1,
        }
    }
}
