//! Get subcommand: read one value from the merged configuration.

use crate::config::ConfigStore;
use crate::error::CliError;
use clap::Args;
use serde_json::{Value, json};
use std::path::PathBuf;

/// Arguments for the get subcommand
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Dotted key path (dots inside event names are handled)
    pub key: Option<String>,

    /// Working directory for project scope discovery
    #[arg(long, value_name = "PATH")]
    pub cwd: Option<PathBuf>,
}

pub fn run(args: &GetArgs, store: &ConfigStore) -> Value {
    let Some(key) = args.key.as_deref() else {
        return CliError::no_key().to_json();
    };

    let cwd = args
        .cwd
        .clone()
        .or_else(|| std::env::current_dir().ok());

    match store.get_key(key, cwd.as_deref()) {
        Some(value) => json!({ "key": key, "value": value }),
        None => CliError::not_found(key).to_json(),
    }
}
