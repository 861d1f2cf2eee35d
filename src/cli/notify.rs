//! Notify subcommand: dispatch one lifecycle event, or all of them as a
//! test run.

use crate::config::ConfigStore;
use crate::error::CliError;
use crate::notify::{NotifyContext, notify};
use crate::types::Event;
use clap::Args;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::time::Duration;

/// Pause between events in an all-events test run, so sounds don't overlap.
const TEST_RUN_PAUSE: Duration = Duration::from_millis(1500);

/// Arguments for the notify subcommand
#[derive(Args, Debug)]
pub struct NotifyArgs {
    /// Event to dispatch (all five in sequence when omitted)
    pub event: Option<String>,

    /// Message override
    #[arg(long)]
    pub message: Option<String>,

    /// Working directory for project scope discovery
    #[arg(long, value_name = "PATH")]
    pub cwd: Option<PathBuf>,
}

pub fn run(args: &NotifyArgs, store: &ConfigStore) -> Value {
    let cwd = args
        .cwd
        .clone()
        .or_else(|| std::env::current_dir().ok());

    let events: Vec<Event> = match args.event.as_deref() {
        Some(name) => match name.parse::<Event>() {
            Ok(event) => vec![event],
            Err(()) => return CliError::unknown_event(name, &Event::names()).to_json(),
        },
        None => Event::ALL.to_vec(),
    };

    let mut dispatched = Vec::new();
    for (i, event) in events.iter().enumerate() {
        if i > 0 {
            std::thread::sleep(TEST_RUN_PAUSE);
        }
        let ctx = NotifyContext {
            cwd: cwd.as_deref(),
            message: args.message.clone(),
        };
        let decision = notify(store, *event, &ctx);
        dispatched.push(json!({
            "event": event.as_str(),
            "result": decision.as_str(),
        }));
    }

    json!({ "success": true, "events": dispatched })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigPaths, Scope};
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> ConfigStore {
        ConfigStore::new(ConfigPaths::with_config_dir(temp.path().join("cfg")))
    }

    #[test]
    fn unknown_event_is_rejected() {
        let temp = TempDir::new().unwrap();
        let args = NotifyArgs {
            event: Some("task.started".into()),
            message: None,
            cwd: Some(temp.path().to_path_buf()),
        };
        let out = run(&args, &store_in(&temp));
        assert_eq!(out["error"], "unknown_event");
    }

    #[test]
    fn disabled_config_reports_without_dispatching() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store
            .save(&json!({"enabled": false}), Scope::Global, None)
            .unwrap();

        let cwd = temp.path().join("plain");
        std::fs::create_dir_all(&cwd).unwrap();
        let args = NotifyArgs {
            event: Some("task.complete".into()),
            message: None,
            cwd: Some(cwd),
        };
        let out = run(&args, &store);
        assert_eq!(out["success"], true);
        assert_eq!(out["events"][0]["result"], "disabled");
    }
}
