//! Set subcommand: validated write of one leaf value at a scope.

use crate::config::{ConfigStore, Scope};
use crate::error::CliError;
use clap::Args;
use serde_json::{Value, json};
use std::path::PathBuf;

/// Arguments for the set subcommand
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Dotted key path into the default schema
    pub key: Option<String>,

    /// Raw value; "true"/"false" and numbers are coerced
    pub value: Option<String>,

    /// Target scope
    #[arg(long, value_enum, default_value_t = Scope::Global)]
    pub scope: Scope,

    /// Working directory for project root discovery
    #[arg(long, value_name = "PATH")]
    pub cwd: Option<PathBuf>,
}

pub fn run(args: &SetArgs, store: &ConfigStore) -> Value {
    let (Some(key), Some(value)) = (args.key.as_deref(), args.value.as_deref()) else {
        return CliError::usage(
            "usage: dding-dong set <key> <value> [--scope global|project|local] [--cwd <path>]",
        )
        .to_json();
    };

    let cwd = args
        .cwd
        .clone()
        .or_else(|| std::env::current_dir().ok());

    match store.set_key(key, value, args.scope, cwd.as_deref()) {
        Ok(outcome) => json!({
            "success": true,
            "key": outcome.key,
            "oldValue": outcome.old_value,
            "newValue": outcome.new_value,
            "scope": outcome.scope,
        }),
        Err(err) => err.to_json(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigPaths;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> ConfigStore {
        ConfigStore::new(ConfigPaths::with_config_dir(temp.path().join("cfg")))
    }

    fn plain_cwd(temp: &TempDir) -> PathBuf {
        let cwd = temp.path().join("plain");
        std::fs::create_dir_all(&cwd).unwrap();
        cwd
    }

    #[test]
    fn reports_old_and_new_value() {
        let temp = TempDir::new().unwrap();
        let args = SetArgs {
            key: Some("sound.volume".into()),
            value: Some("0.5".into()),
            scope: Scope::Global,
            cwd: Some(plain_cwd(&temp)),
        };
        let out = run(&args, &store_in(&temp));
        assert_eq!(out["success"], true);
        assert_eq!(out["oldValue"], 0.7);
        assert_eq!(out["newValue"], 0.5);
        assert_eq!(out["scope"], "global");
    }

    #[test]
    fn missing_arguments_report_usage() {
        let temp = TempDir::new().unwrap();
        let args = SetArgs {
            key: Some("sound.volume".into()),
            value: None,
            scope: Scope::Global,
            cwd: None,
        };
        let out = run(&args, &store_in(&temp));
        assert_eq!(out["error"], "usage");
    }

    #[test]
    fn invalid_key_error_passes_through() {
        let temp = TempDir::new().unwrap();
        let args = SetArgs {
            key: Some("ghost".into()),
            value: Some("1".into()),
            scope: Scope::Global,
            cwd: Some(plain_cwd(&temp)),
        };
        let out = run(&args, &store_in(&temp));
        assert_eq!(out["error"], "invalid_key");
        assert!(out["validKeys"].is_array());
    }

    #[test]
    fn project_scope_without_root_errors() {
        let temp = TempDir::new().unwrap();
        let args = SetArgs {
            key: Some("enabled".into()),
            value: Some("false".into()),
            scope: Scope::Project,
            cwd: Some(plain_cwd(&temp)),
        };
        let out = run(&args, &store_in(&temp));
        assert_eq!(out["error"], "no_project_root");
    }
}
