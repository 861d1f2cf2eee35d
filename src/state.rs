//! Cooldown state persistence.
//!
//! A single global file, separate from configuration and excluded from merge
//! logic. Both load and save are best effort: a missing or corrupt state file
//! simply means "never notified".

use crate::config::ConfigPaths;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Persistent notification state, `<config-dir>/.state.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotifyState {
    /// Unix milliseconds of the last delivered notification.
    #[serde(rename = "lastNotifiedAt", skip_serializing_if = "Option::is_none")]
    pub last_notified_at: Option<i64>,
}

/// Load the state file, defaulting on any failure.
pub fn load_state(paths: &ConfigPaths) -> NotifyState {
    std::fs::read_to_string(paths.state_file())
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_default()
}

/// Persist the state file. Failures are logged and swallowed: cooldown
/// tracking must never block a notification.
pub fn save_state(paths: &ConfigPaths, state: &NotifyState) {
    if let Err(err) = paths.ensure_config_dir() {
        warn!(%err, "could not create config dir for state file");
        return;
    }
    let Ok(mut text) = serde_json::to_string(state) else {
        return;
    };
    text.push('\n');
    if let Err(err) = std::fs::write(paths.state_file(), text) {
        warn!(%err, "could not write state file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn state_round_trips() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_config_dir(temp.path().join("cfg"));

        let state = NotifyState {
            last_notified_at: Some(1_700_000_000_000),
        };
        save_state(&paths, &state);
        assert_eq!(load_state(&paths), state);
    }

    #[test]
    fn missing_or_corrupt_state_defaults() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_config_dir(temp.path().join("cfg"));
        assert_eq!(load_state(&paths), NotifyState::default());

        paths.ensure_config_dir().unwrap();
        std::fs::write(paths.state_file(), "not json").unwrap();
        assert_eq!(load_state(&paths), NotifyState::default());
    }
}
