//! Hook subcommand: the host-process integration point.
//!
//! Reads the host's hook event JSON from stdin, dispatches the lifecycle
//! event, and always writes a response object. Hooks that expect a response
//! (the stop hook) must get one even when everything else fails, so this
//! path never errors and never exits non-zero.

use crate::config::ConfigStore;
use crate::notify::{NotifyContext, notify};
use crate::types::Event;
use clap::Args;
use serde::Deserialize;
use serde_json::{Value, json};
use std::io::Read;
use std::path::PathBuf;
use tracing::warn;

/// Arguments for the hook subcommand
#[derive(Args, Debug)]
pub struct HookArgs {
    /// Lifecycle event this hook maps to
    pub event: String,

    /// JSON object to respond with (e.g. '{"decision":"continue"}')
    #[arg(long)]
    pub respond: Option<String>,
}

/// The subset of the host's hook payload we care about.
#[derive(Debug, Default, Deserialize)]
struct HookEvent {
    #[serde(default)]
    cwd: Option<PathBuf>,
}

pub fn run(args: &HookArgs, store: &ConfigStore) -> Value {
    let respond = args
        .respond
        .as_deref()
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_else(|| json!({}));

    let Ok(event) = args.event.parse::<Event>() else {
        warn!(event = %args.event, "hook received unknown event");
        return respond;
    };

    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        return respond;
    }
    let payload: HookEvent = serde_json::from_str(&input).unwrap_or_default();

    let cwd = payload
        .cwd
        .or_else(|| std::env::current_dir().ok());
    let ctx = NotifyContext {
        cwd: cwd.as_deref(),
        message: None,
    };
    notify(store, event, &ctx);

    respond
}
