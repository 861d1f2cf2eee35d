//! Verify subcommand: validate the merged configuration and scope files.
//!
//! Unlike every other subcommand, verify exits non-zero when invalid; it is
//! meant for CI-style checks where the exit code is the contract.

use crate::config::{
    ConfigPaths, ConfigStore, META_KEY, Scope, default_config, find_project_root,
};
use clap::Args;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// Arguments for the verify subcommand
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Working directory for project scope discovery
    #[arg(long, value_name = "PATH")]
    pub cwd: Option<PathBuf>,
}

/// Returns the JSON report and the process exit code (0 valid, 1 invalid).
pub fn run(args: &VerifyArgs, store: &ConfigStore) -> (Value, i32) {
    let cwd = args
        .cwd
        .clone()
        .or_else(|| std::env::current_dir().ok());

    let mut errors = Vec::new();
    check_scope_files(store, cwd.as_deref(), &mut errors);

    let merged = store.resolve(cwd.as_deref());
    check_merged(&merged, &mut errors);

    let valid = errors.is_empty();
    let code = if valid { 0 } else { 1 };
    (json!({ "valid": valid, "errors": errors }), code)
}

/// Every scope file that exists must parse as a JSON object.
fn check_scope_files(store: &ConfigStore, cwd: Option<&Path>, errors: &mut Vec<String>) {
    let mut files = vec![(Scope::Global, store.paths().config_file())];
    if let Some(root) = cwd.and_then(find_project_root) {
        files.push((Scope::Project, ConfigPaths::project_config_file(&root)));
        files.push((Scope::Local, ConfigPaths::project_local_config_file(&root)));
    }

    for (scope, path) in files {
        if !path.is_file() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(value) if value.is_object() => {}
                Ok(_) => errors.push(format!(
                    "{scope} config at {} is not a JSON object",
                    path.display()
                )),
                Err(err) => errors.push(format!(
                    "{scope} config at {} is not valid JSON: {err}",
                    path.display()
                )),
            },
            Err(err) => errors.push(format!(
                "{scope} config at {} is unreadable: {err}",
                path.display()
            )),
        }
    }
}

fn check_merged(merged: &Value, errors: &mut Vec<String>) {
    for key in ["enabled", "sound.enabled", "notification.enabled", "quiet_hours.enabled"] {
        if let Some(value) = lookup(merged, key)
            && !value.is_boolean()
        {
            errors.push(format!("{key} must be a boolean"));
        }
    }

    match lookup(merged, "sound.volume") {
        Some(value) => match value.as_f64() {
            Some(v) if (0.0..=1.0).contains(&v) => {}
            Some(v) => errors.push(format!("sound.volume must be within 0..=1, got {v}")),
            None => errors.push("sound.volume must be a number".to_string()),
        },
        None => {}
    }

    for key in ["language", "sound.pack"] {
        if let Some(value) = lookup(merged, key)
            && !value.is_string()
        {
            errors.push(format!("{key} must be a string"));
        }
    }

    for key in ["quiet_hours.start", "quiet_hours.end"] {
        if let Some(value) = lookup(merged, key) {
            let ok = value.as_str().is_some_and(is_hhmm);
            if !ok {
                errors.push(format!("{key} must be an HH:MM string"));
            }
        }
    }

    if let Some(value) = lookup(merged, "cooldown_seconds") {
        match value.as_f64() {
            Some(v) if v >= 0.0 => {}
            Some(v) => errors.push(format!("cooldown_seconds must be non-negative, got {v}")),
            None => errors.push("cooldown_seconds must be a number".to_string()),
        }
    }

    // Unknown top-level keys are almost always typos in an override file.
    if let (Some(merged_map), Some(schema_map)) =
        (merged.as_object(), default_config().as_object().cloned())
    {
        for key in merged_map.keys() {
            if key != META_KEY && !schema_map.contains_key(key) {
                errors.push(format!("unknown top-level key: {key}"));
            }
        }
    }

    for channel in ["sound", "notification"] {
        if let Some(events) = lookup(merged, channel).and_then(|c| c.get("events"))
            && let Some(map) = events.as_object()
        {
            for (event, toggle) in map {
                if !toggle.is_boolean() {
                    errors.push(format!("{channel}.events.{event} must be a boolean"));
                }
            }
        }
    }
}

fn lookup<'a>(root: &'a Value, dotted: &str) -> Option<&'a Value> {
    // Top-level schema keys have no literal dots, so a plain split suffices.
    dotted.split('.').try_fold(root, |cur, seg| cur.get(seg))
}

fn is_hhmm(s: &str) -> bool {
    s.split_once(':').is_some_and(|(h, m)| {
        h.parse::<u32>().is_ok_and(|h| h < 24) && m.parse::<u32>().is_ok_and(|m| m < 60)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn defaults_are_valid() {
        let temp = TempDir::new().unwrap();
        let args = VerifyArgs {
            cwd: Some(plain_cwd(&temp)),
        };
        let (out, code) = run(&args, &store_in(&temp));
        assert_eq!(out["valid"], true);
        assert_eq!(code, 0);
    }

    #[test]
    fn out_of_range_volume_is_reported() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store
            .save(&json!({"sound": {"volume": 1.5}}), Scope::Global, None)
            .unwrap();

        let args = VerifyArgs {
            cwd: Some(plain_cwd(&temp)),
        };
        let (out, code) = run(&args, &store);
        assert_eq!(out["valid"], false);
        assert_eq!(code, 1);
        let errors = out["errors"].as_array().unwrap();
        assert!(errors.iter().any(|e| e.as_str().unwrap().contains("sound.volume")));
    }

    #[test]
    fn corrupt_scope_file_is_reported_but_merged_view_still_checks() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::create_dir_all(store.paths().config_dir()).unwrap();
        std::fs::write(store.paths().config_file(), "{ broken").unwrap();

        let args = VerifyArgs {
            cwd: Some(plain_cwd(&temp)),
        };
        let (out, code) = run(&args, &store);
        assert_eq!(out["valid"], false);
        assert_eq!(code, 1);
        let errors = out["errors"].as_array().unwrap();
        assert!(errors.iter().any(|e| e.as_str().unwrap().contains("not valid JSON")));
    }

    #[test]
    fn unknown_top_level_keys_and_bad_toggles_are_reported() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store
            .save(
                &json!({
                    "volume": 0.5,
                    "sound": {"events": {"task.complete": "yes"}}
                }),
                Scope::Global,
                None,
            )
            .unwrap();

        let args = VerifyArgs {
            cwd: Some(plain_cwd(&temp)),
        };
        let (out, _) = run(&args, &store);
        let errors = out["errors"].as_array().unwrap();
        assert!(errors.iter().any(|e| e.as_str().unwrap().contains("unknown top-level key: volume")));
        assert!(errors.iter().any(|e| {
            e.as_str()
                .unwrap()
                .contains("sound.events.task.complete must be a boolean")
        }));
    }

    #[test]
    fn quiet_hours_strings_are_validated() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store
            .save(
                &json!({"quiet_hours": {"start": "25:99"}}),
                Scope::Global,
                None,
            )
            .unwrap();

        let args = VerifyArgs {
            cwd: Some(plain_cwd(&temp)),
        };
        let (out, code) = run(&args, &store);
        assert_eq!(code, 1);
        let errors = out["errors"].as_array().unwrap();
        assert!(errors.iter().any(|e| e.as_str().unwrap().contains("quiet_hours.start")));
    }
}
