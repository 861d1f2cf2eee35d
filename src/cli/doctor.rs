//! Doctor subcommand: diagnostic report, no mutation.
//!
//! Collects setup status (from `_meta`), the merged configuration, per-scope
//! file paths with existence flags, and platform detection results.

use crate::config::{ConfigPaths, ConfigStore, META_KEY, find_project_root};
use crate::platform::Detection;
use clap::Args;
use serde_json::{Value, json};
use std::path::PathBuf;

/// Arguments for the doctor subcommand
#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Working directory for project scope discovery
    #[arg(long, value_name = "PATH")]
    pub cwd: Option<PathBuf>,
}

pub fn run(args: &DoctorArgs, store: &ConfigStore) -> Value {
    let cwd = args
        .cwd
        .clone()
        .or_else(|| std::env::current_dir().ok());
    let config = store.resolve(cwd.as_deref());

    let setup = match config.get(META_KEY) {
        Some(meta) if meta["setupCompleted"].as_bool() == Some(true) => json!({
            "completed": true,
            "version": meta.get("setupVersion").cloned().unwrap_or(Value::Null),
            "date": meta.get("setupDate").cloned().unwrap_or(Value::Null),
        }),
        _ => json!({ "completed": false }),
    };

    let global_path = store.paths().config_file();
    let project_root = cwd.as_deref().and_then(find_project_root);
    let project_path = project_root.as_deref().map(ConfigPaths::project_config_file);
    let local_path = project_root
        .as_deref()
        .map(ConfigPaths::project_local_config_file);

    let detection = Detection::new();

    json!({
        "setup": setup,
        "config": config,
        "paths": {
            "global": path_entry(Some(global_path)),
            "project": path_entry(project_path),
            "projectLocal": path_entry(local_path),
        },
        "environment": detection.info(),
    })
}

fn path_entry(path: Option<PathBuf>) -> Value {
    match path {
        Some(path) => json!({ "path": path.clone(), "exists": path.is_file() }),
        None => json!({ "path": Value::Null, "exists": false }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Scope;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> ConfigStore {
        ConfigStore::new(ConfigPaths::with_config_dir(temp.path().join("cfg")))
    }

    #[test]
    fn reports_incomplete_setup_and_absent_paths() {
        let temp = TempDir::new().unwrap();
        let cwd = temp.path().join("plain");
        std::fs::create_dir_all(&cwd).unwrap();
        let args = DoctorArgs { cwd: Some(cwd) };

        let out = run(&args, &store_in(&temp));
        assert_eq!(out["setup"]["completed"], false);
        assert_eq!(out["paths"]["global"]["exists"], false);
        assert!(out["paths"]["project"]["path"].is_null());
        assert!(out["config"]["sound"]["volume"].is_number());
        assert!(out["environment"]["platform"].is_string());
    }

    #[test]
    fn surfaces_setup_metadata_and_project_paths() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store
            .save(
                &json!({"_meta": {"setupCompleted": true, "setupVersion": "0.3.0"}}),
                Scope::Global,
                None,
            )
            .unwrap();

        let repo = temp.path().join("repo");
        std::fs::create_dir_all(repo.join(".dding-dong")).unwrap();
        std::fs::write(ConfigPaths::project_config_file(&repo), "{}\n").unwrap();

        let args = DoctorArgs {
            cwd: Some(repo.clone()),
        };
        let out = run(&args, &store);
        assert_eq!(out["setup"]["completed"], true);
        assert_eq!(out["setup"]["version"], "0.3.0");
        assert_eq!(out["paths"]["global"]["exists"], true);
        assert_eq!(out["paths"]["project"]["exists"], true);
        assert_eq!(out["paths"]["projectLocal"]["exists"], false);
    }
}
