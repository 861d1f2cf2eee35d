//! Save subcommand: persist a whole config document at a scope.

use crate::config::{ConfigStore, Scope, find_project_root};
use crate::error::CliError;
use clap::Args;
use serde_json::{Value, json};
use std::path::PathBuf;

/// Arguments for the save subcommand
#[derive(Args, Debug)]
pub struct SaveArgs {
    /// The config document as a JSON string
    pub document: Option<String>,

    /// Target scope
    #[arg(long, value_enum, default_value_t = Scope::Global)]
    pub scope: Scope,

    /// Working directory for project root discovery
    #[arg(long, value_name = "PATH")]
    pub cwd: Option<PathBuf>,
}

pub fn run(args: &SaveArgs, store: &ConfigStore) -> Value {
    let Some(raw) = args.document.as_deref() else {
        return CliError::usage(
            "usage: dding-dong save <json> [--scope global|project|local] [--cwd <path>]",
        )
        .to_json();
    };

    let document: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => return CliError::invalid_json(err).to_json(),
    };

    let project_root = if args.scope.requires_project_root() {
        let cwd = args
            .cwd
            .clone()
            .or_else(|| std::env::current_dir().ok());
        match cwd.as_deref().and_then(find_project_root) {
            Some(root) => Some(root),
            None => return CliError::no_project_root().to_json(),
        }
    } else {
        None
    };

    match store.save(&document, args.scope, project_root.as_deref()) {
        Ok(path) => json!({
            "success": true,
            "scope": args.scope,
            "path": path,
        }),
        Err(err) => CliError::from(err).to_json(),
    }
}
