//! sfdeploy - Salesforce metadata deployment helper for CI pipelines
//!
//! sfdeploy drives `sfdx force:source:deploy` from a pipeline job while a
//! background watcher tails the deploy log for the Deploy ID and renders a
//! monitoring link. It also resolves the default package directory from an
//! `sfdx-project.json` manifest for use in shell pipelines.

pub mod command;
pub mod deploy;
pub mod error;
pub mod project;
pub mod runner;
pub mod watcher;

// Re-exports for convenience
pub use command::{build_command, BuiltCommand, DeployRequest, PipelineSource, NO_TESTS};
pub use deploy::{execute, DeployEvent, DeployOutcome, Termination};
pub use error::{DeployError, DeployResult};
pub use project::{resolve_default_dir, PackageDirectoryEntry, ProjectManifest};
pub use runner::run_shell;
pub use watcher::{extract_deploy_id, monitor_url, WatchOptions};
