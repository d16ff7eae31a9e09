//! sfdeploy CLI - Salesforce metadata deployment helper
//!
//! Usage: sfdeploy <COMMAND>
//!
//! Commands:
//!   deploy       Deploy metadata to a Salesforce org via sfdx
//!   package-dir  Print the default package directory from sfdx-project.json

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use sfdeploy::project::PROJECT_FILE;
use sfdeploy::{DeployEvent, DeployRequest, PipelineSource, ProjectManifest, Termination, NO_TESTS};

/// sfdeploy - Salesforce metadata deployment helper for CI pipelines
#[derive(Parser, Debug)]
#[command(name = "sfdeploy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format for CI
    #[arg(long, default_value = "false")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Deploy metadata to a Salesforce org
    ///
    /// Pipe the job output into the deploy log so the monitoring link can be
    /// extracted while the deploy runs:
    ///   sfdeploy deploy --args | tee -a deploy_log.txt
    Deploy {
        /// Comma-separated Apex test classes to run against
        #[arg(short, long, default_value = NO_TESTS)]
        tests: String,

        /// Path to the package.xml manifest
        #[arg(short, long, default_value = "manifest/package.xml")]
        manifest: PathBuf,

        /// Minutes to wait for the deploy command to complete
        #[arg(short, long, default_value_t = 33, value_parser = clap::value_parser!(u32).range(1..))]
        wait: u32,

        /// Salesforce environment URL
        #[arg(short, long)]
        environment: Option<String>,

        /// Deploy log the command output is written to
        #[arg(short, long, default_value = "deploy_log.txt")]
        log: PathBuf,

        /// Pipeline source
        #[arg(short, long, value_enum, default_value_t = PipelineSource::Push)]
        pipeline: PipelineSource,

        /// Run a validation-only deployment (for quick deploys)
        #[arg(short, long)]
        validate: bool,

        /// Print the command rather than run it
        #[arg(short, long)]
        debug: bool,
    },

    /// Print the default package directory from sfdx-project.json
    PackageDir {
        /// Path to the JSON file, if not the default value
        #[arg(short, long, default_value = PROJECT_FILE)]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Deploy {
            tests,
            manifest,
            wait,
            environment,
            log,
            pipeline,
            validate,
            debug,
        } => {
            let req = DeployRequest {
                tests,
                manifest,
                wait,
                environment,
                log,
                pipeline,
                validate,
                debug,
            };
            cmd_deploy(&req, cli.json)
        }
        Commands::PackageDir { file } => cmd_package_dir(&file, cli.json),
    }
}

fn cmd_deploy(req: &DeployRequest, json: bool) -> Result<()> {
    let outcome = match sfdeploy::execute(req, move |event| render_event(&event, json)) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("✗ Error: {e}");
            std::process::exit(e.exit_code());
        }
    };

    match outcome.termination {
        Termination::Skipped | Termination::DryRun => {}
        Termination::Deployed => {
            if json {
                let output = serde_json::json!({
                    "event": "deployed",
                    "monitor_url": outcome.monitor_url,
                });
                println!("{}", serde_json::to_string(&output)?);
            } else {
                println!("✓ Deploy command completed");
            }
        }
    }

    Ok(())
}

fn render_event(event: &DeployEvent, json: bool) {
    if json {
        let output = match event {
            DeployEvent::CommandBuilt { command } => {
                serde_json::json!({"event": "command", "command": command})
            }
            DeployEvent::Skipped => serde_json::json!({"event": "skipped"}),
            DeployEvent::DryRun => serde_json::json!({"event": "dry_run"}),
            DeployEvent::MonitorUrl { url } => {
                serde_json::json!({"event": "monitor_url", "url": url})
            }
        };
        println!("{output}");
    } else {
        match event {
            DeployEvent::CommandBuilt { command } => println!("{command}"),
            DeployEvent::Skipped => {
                println!("Not running a validation without test classes.");
            }
            DeployEvent::DryRun => {}
            DeployEvent::MonitorUrl { url } => println!("{url}"),
        }
    }
}

fn cmd_package_dir(file: &Path, json: bool) -> Result<()> {
    let result = ProjectManifest::load(file).and_then(|manifest| {
        manifest.default_dir().map(|path| path.to_string())
    });

    let path = match result {
        Ok(path) => path,
        Err(e) => {
            eprintln!("✗ Error: {e}");
            std::process::exit(e.exit_code());
        }
    };

    if json {
        let output = serde_json::json!({"event": "package_dir", "path": path});
        println!("{}", serde_json::to_string(&output)?);
    } else {
        // Sole product on stdout, for consumption by a calling shell pipeline
        println!("{path}");
    }

    Ok(())
}
