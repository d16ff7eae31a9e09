//! Deploy log watcher
//!
//! Tails the deploy log on a detached background thread while the deploy
//! command runs, looking for the `Deploy ID:` line the Salesforce CLI prints.
//! On the first match it renders the classic Setup monitoring URL and
//! retires. The thread is never joined: if the manifest is empty no ID is
//! ever written, and the watcher simply dies with the process.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

use regex::Regex;

/// Classic Setup path for the deployment status page
pub const MONITOR_PATH: &str = "/changemgmt/monitorDeploymentsDetails.apexp?retURL=\
                                /changemgmt/monitorDeployment.apexp&asyncId=";

/// Sleep between reads that returned no new data
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// The CLI appends a 3-character job suffix that is not part of the
/// browsable deploy ID.
const JOB_SUFFIX_LEN: usize = 3;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Deploy log to tail
    pub log: PathBuf,
    /// Org base URL the monitoring path is appended to
    pub environment: String,
}

fn deploy_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"Deploy ID: (.*)").expect("valid deploy ID pattern"))
}

/// Extract the deploy ID token from a log line, if present
pub fn extract_deploy_id(line: &str) -> Option<String> {
    deploy_id_pattern()
        .captures(line)
        .map(|caps| caps[1].trim().to_string())
}

/// Render the monitoring URL for a deploy ID, dropping the job suffix.
///
/// The suffix is counted in characters, not bytes - the token is whatever
/// the regex captured from tee'd job output and need not be ASCII.
pub fn monitor_url(environment: &str, deploy_id: &str) -> String {
    let cut = deploy_id
        .char_indices()
        .rev()
        .nth(JOB_SUFFIX_LEN - 1)
        .map_or(0, |(i, _)| i);
    format!("{environment}{MONITOR_PATH}{}", &deploy_id[..cut])
}

/// Start tailing the log on a detached thread.
///
/// `on_url` is invoked at most once, from the watcher thread. The watcher is
/// best-effort: spawn or read failures only cost the monitoring link, they
/// never abort the program.
pub fn spawn(options: WatchOptions, on_url: impl FnOnce(String) + Send + 'static) {
    let _ = thread::Builder::new()
        .name("deploy-log-watcher".to_string())
        .spawn(move || watch_loop(&options.log, &options.environment, on_url));
}

/// Poll the append-only log for the deploy ID line.
///
/// The reader keeps its cursor between polls; an empty read means the writer
/// has not caught up yet, not end of stream. Lines are buffered until the
/// trailing newline arrives so a mid-line write is never matched early.
fn watch_loop(log: &Path, environment: &str, on_url: impl FnOnce(String)) {
    let file = match File::open(log) {
        Ok(file) => file,
        Err(_) => return,
    };
    let mut reader = BufReader::new(file);
    let mut pending = String::new();

    loop {
        let mut chunk = String::new();
        match reader.read_line(&mut chunk) {
            Ok(0) => thread::sleep(POLL_INTERVAL),
            Ok(_) => {
                pending.push_str(&chunk);
                if !pending.ends_with('\n') {
                    continue;
                }
                if let Some(id) = extract_deploy_id(&pending) {
                    on_url(monitor_url(environment, &id));
                    return;
                }
                pending.clear();
            }
            Err(_) => return,
        }
    }
}
