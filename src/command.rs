//! Deploy command construction
//!
//! Builds the exact `sfdx force:source:deploy` invocation for a request and
//! decides whether the run should be skipped entirely. The command string is
//! deterministic given the request.

use std::path::PathBuf;

use clap::ValueEnum;

/// Sentinel test selector meaning "no tests were specified"
pub const NO_TESTS: &str = "not,a,test";

/// What triggered the pipeline running this deploy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PipelineSource {
    Push,
    MergeRequest,
}

/// One deployment request, built once from CLI input and read-only after
#[derive(Debug, Clone)]
pub struct DeployRequest {
    /// Comma-separated Apex test classes to run against
    pub tests: String,
    /// Path to the package.xml manifest
    pub manifest: PathBuf,
    /// Minutes to wait for the deploy command to complete
    pub wait: u32,
    /// Salesforce org base URL, used for the monitoring link
    pub environment: Option<String>,
    /// Deploy log the command output is tee'd into
    pub log: PathBuf,
    /// Pipeline source
    pub pipeline: PipelineSource,
    /// Run a validation-only (check-only) deployment
    pub validate: bool,
    /// Print the command rather than run it
    pub debug: bool,
}

/// Built invocation plus the skip decision
#[derive(Debug, Clone)]
pub struct BuiltCommand {
    pub command: String,
    pub skip: bool,
}

/// Build the canonical deploy invocation for a request.
///
/// Push pipelines which validate and quick-deploy must run tests during
/// validation to be eligible for a quick deploy, so a push-triggered
/// validation without test classes is skipped rather than run.
pub fn build_command(req: &DeployRequest) -> BuiltCommand {
    let command = format!(
        "sfdx force:source:deploy -x {} -l RunSpecifiedTests -r \"{}\" -w {} --verbose{}",
        req.manifest.display(),
        req.tests,
        req.wait,
        if req.validate { " -c" } else { "" }
    );

    let skip = req.validate && req.tests == NO_TESTS && req.pipeline == PipelineSource::Push;

    BuiltCommand { command, skip }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DeployRequest {
        DeployRequest {
            tests: NO_TESTS.to_string(),
            manifest: PathBuf::from("manifest/package.xml"),
            wait: 33,
            environment: Some("https://example.my.salesforce.com".to_string()),
            log: PathBuf::from("deploy_log.txt"),
            pipeline: PipelineSource::Push,
            validate: false,
            debug: false,
        }
    }

    #[test]
    fn builds_canonical_deploy_command() {
        let req = DeployRequest {
            tests: "AccountTest,LeadTest".to_string(),
            wait: 20,
            ..request()
        };

        let built = build_command(&req);
        assert_eq!(
            built.command,
            "sfdx force:source:deploy -x manifest/package.xml \
             -l RunSpecifiedTests -r \"AccountTest,LeadTest\" -w 20 --verbose"
        );
        assert!(!built.skip);
    }

    #[test]
    fn validate_appends_check_only_switch() {
        let req = DeployRequest {
            tests: "AccountTest".to_string(),
            validate: true,
            ..request()
        };

        let built = build_command(&req);
        assert!(built.command.ends_with("--verbose -c"));
        assert!(!built.skip);
    }

    #[test]
    fn push_validation_without_tests_is_skipped() {
        let req = DeployRequest {
            validate: true,
            ..request()
        };

        assert!(build_command(&req).skip);
    }

    #[test]
    fn merge_request_validation_without_tests_is_not_skipped() {
        let req = DeployRequest {
            validate: true,
            pipeline: PipelineSource::MergeRequest,
            ..request()
        };

        assert!(!build_command(&req).skip);
    }

    #[test]
    fn push_deploy_without_tests_is_not_skipped() {
        // Skip applies only to validation runs.
        assert!(!build_command(&request()).skip);
    }

    #[test]
    fn command_is_deterministic() {
        let req = request();
        assert_eq!(build_command(&req).command, build_command(&req).command);
    }
}
