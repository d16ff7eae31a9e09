//! Deployment orchestration
//!
//! Sequences one deploy run: build the command, honor the skip and dry-run
//! policies, truncate the deploy log, start the log watcher, then block on
//! the external deploy command. The watcher is started before the command so
//! an early `Deploy ID:` line cannot slip past it, and it is never waited
//! on - the main flow blocks solely on the deploy process.

use std::fs::File;
use std::sync::{mpsc, Arc};

use crate::command::{build_command, DeployRequest};
use crate::error::DeployResult;
use crate::runner::run_shell;
use crate::watcher::{self, WatchOptions};

/// Progress events emitted during a run, for the caller to render
#[derive(Debug, Clone)]
pub enum DeployEvent {
    CommandBuilt { command: String },
    Skipped,
    DryRun,
    MonitorUrl { url: String },
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Push-triggered validation without tests; nothing was deployed
    Skipped,
    /// Debug mode; the command was only printed
    DryRun,
    /// The deploy command ran and exited zero
    Deployed,
}

/// Result of one orchestration run
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    pub termination: Termination,
    /// Monitoring URL, when the watcher found the deploy ID in time
    pub monitor_url: Option<String>,
}

/// Run one deployment end to end.
///
/// Failures from the deploy command propagate as `DeploymentFailed`; the
/// watcher thread is simply abandoned in that case.
pub fn execute<F>(req: &DeployRequest, on_event: F) -> DeployResult<DeployOutcome>
where
    F: Fn(DeployEvent) + Send + Sync + 'static,
{
    let on_event = Arc::new(on_event);

    let built = build_command(req);
    on_event(DeployEvent::CommandBuilt {
        command: built.command.clone(),
    });

    if built.skip {
        on_event(DeployEvent::Skipped);
        return Ok(DeployOutcome {
            termination: Termination::Skipped,
            monitor_url: None,
        });
    }

    if req.debug {
        on_event(DeployEvent::DryRun);
        return Ok(DeployOutcome {
            termination: Termination::DryRun,
            monitor_url: None,
        });
    }

    // Truncate the log so the watcher attaches to a clean append point.
    File::create(&req.log)?;

    let (tx, rx) = mpsc::channel();
    let watcher_events = Arc::clone(&on_event);
    watcher::spawn(
        WatchOptions {
            log: req.log.clone(),
            environment: req.environment.clone().unwrap_or_default(),
        },
        move |url| {
            watcher_events(DeployEvent::MonitorUrl { url: url.clone() });
            let _ = tx.send(url);
        },
    );

    run_shell(&built.command)?;

    // Never wait on the watcher; take the URL only if it already arrived.
    let monitor_url = rx.try_recv().ok();

    Ok(DeployOutcome {
        termination: Termination::Deployed,
        monitor_url,
    })
}
