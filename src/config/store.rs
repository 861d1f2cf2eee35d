//! Scoped reads and writes of configuration files.
//!
//! Saving is "best effort complete": the previous file is snapshotted first,
//! the write is round-trip verified, and a failed verification triggers a
//! restore from the newest backup without failing the save call.

use super::backup;
use super::paths::ConfigPaths;
use super::{RETAINED_BACKUPS, Scope};
use crate::error::{ConfigError, ConfigResult};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Scoped configuration store.
///
/// Holds only the resolved global paths; project paths are derived per call
/// from a discovered project root.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    paths: ConfigPaths,
}

impl ConfigStore {
    pub fn new(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    /// Store rooted at the discovered user config directory.
    pub fn discover() -> Self {
        Self::new(ConfigPaths::discover())
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// The file backing `scope`. Project and local scopes require a root.
    pub fn scope_file(
        &self,
        scope: Scope,
        project_root: Option<&Path>,
    ) -> ConfigResult<PathBuf> {
        match scope {
            Scope::Global => Ok(self.paths.config_file()),
            Scope::Project => project_root
                .map(ConfigPaths::project_config_file)
                .ok_or(ConfigError::NoProjectRoot),
            Scope::Local => project_root
                .map(ConfigPaths::project_local_config_file)
                .ok_or(ConfigError::NoProjectRoot),
        }
    }

    /// Read and parse the raw (unmerged) file for one scope.
    ///
    /// Missing file, missing project root, and parse failures all yield
    /// `None`: an optional layer must never prevent resolution. A file that
    /// exists but does not parse is surfaced as a warning so corruption is
    /// distinguishable from plain absence in the logs.
    pub fn load_scope(&self, scope: Scope, project_root: Option<&Path>) -> Option<Value> {
        let path = self.scope_file(scope, project_root).ok()?;
        read_json(&path)
    }

    /// Serialize `document` to the file backing `scope`.
    ///
    /// Creates the containing directory, snapshots the existing file (backup
    /// failures are swallowed), writes formatted JSON with a trailing
    /// newline, then re-reads the file as a round-trip check. On a failed
    /// check the newest backup is restored over the file; the save still
    /// reports the target path, since the write itself completed.
    pub fn save(
        &self,
        document: &Value,
        scope: Scope,
        project_root: Option<&Path>,
    ) -> ConfigResult<PathBuf> {
        self.save_with_verify(document, scope, project_root, round_trip_ok)
    }

    /// [`ConfigStore::save`] with an explicit post-write verification check.
    fn save_with_verify(
        &self,
        document: &Value,
        scope: Scope,
        project_root: Option<&Path>,
        verify: impl Fn(&Path) -> bool,
    ) -> ConfigResult<PathBuf> {
        let path = self.scope_file(scope, project_root)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        if path.exists() {
            match backup::create_backup(&path) {
                Ok(snapshot) => {
                    debug!(backup = %snapshot.display(), "snapshotted config before save");
                    backup::prune_backups(&path, RETAINED_BACKUPS);
                }
                Err(err) => warn!(path = %path.display(), %err, "config backup failed"),
            }
        }

        let mut text = serde_json::to_string_pretty(document)?;
        text.push('\n');
        std::fs::write(&path, text).map_err(|e| ConfigError::io(&path, e))?;

        if !verify(&path) {
            warn!(path = %path.display(), "saved config failed round-trip check");
            match backup::restore_latest(&path) {
                Ok(true) => warn!(path = %path.display(), "restored config from newest backup"),
                Ok(false) => warn!(path = %path.display(), "no backup available for restore"),
                Err(err) => warn!(path = %path.display(), %err, "backup restore failed"),
            }
        }

        Ok(path)
    }
}

fn read_json(path: &Path) -> Option<Value> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), %err, "config file unreadable, skipping layer");
            }
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(path = %path.display(), %err, "config file is not valid JSON, skipping layer");
            None
        }
    }
}

fn round_trip_ok(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str::<Value>(&content).ok())
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> ConfigStore {
        ConfigStore::new(ConfigPaths::with_config_dir(temp.path().join("cfg")))
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let doc = json!({"sound": {"volume": 0.5}});

        let path = store.save(&doc, Scope::Global, None).unwrap();
        assert!(path.ends_with("config.json"));
        assert_eq!(store.load_scope(Scope::Global, None), Some(doc));

        // Formatted JSON with a trailing newline.
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with('\n'));
        assert!(text.contains("\n  "));
    }

    #[test]
    fn project_scope_without_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let err = store.save(&json!({}), Scope::Project, None).unwrap_err();
        assert!(matches!(err, ConfigError::NoProjectRoot));
        assert!(store.load_scope(Scope::Local, None).is_none());
    }

    #[test]
    fn scope_files_by_scope() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let root = temp.path().join("repo");

        assert!(
            store
                .scope_file(Scope::Project, Some(&root))
                .unwrap()
                .ends_with(".dding-dong/config.json")
        );
        assert!(
            store
                .scope_file(Scope::Local, Some(&root))
                .unwrap()
                .ends_with(".dding-dong/config.local.json")
        );
    }

    #[test]
    fn malformed_file_loads_as_none() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::create_dir_all(store.paths().config_dir()).unwrap();
        std::fs::write(store.paths().config_file(), "{ broken").unwrap();

        assert!(store.load_scope(Scope::Global, None).is_none());
    }

    #[test]
    fn repeated_saves_retain_three_backups() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        for i in 0..5 {
            store
                .save(&json!({"v": i}), Scope::Global, None)
                .unwrap();
        }

        // First save had nothing to back up; of the 4 snapshots since, only
        // the 3 newest survive pruning.
        let backups = backup::list_backups(&store.paths().config_file());
        assert_eq!(backups.len(), RETAINED_BACKUPS);
        let contents: Vec<Value> = backups
            .iter()
            .map(|p| serde_json::from_str(&std::fs::read_to_string(p).unwrap()).unwrap())
            .collect();
        assert_eq!(contents, vec![json!({"v": 1}), json!({"v": 2}), json!({"v": 3})]);
    }

    #[test]
    fn failed_verification_restores_the_newest_backup() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.save(&json!({"v": 1}), Scope::Global, None).unwrap();
        store.save(&json!({"v": 2}), Scope::Global, None).unwrap();

        // Simulated post-write corruption: verification rejects the file.
        let checks = std::cell::Cell::new(0);
        let path = store
            .save_with_verify(&json!({"v": 3}), Scope::Global, None, |_| {
                checks.set(checks.get() + 1);
                false
            })
            .unwrap();

        // Exactly one check, one restore, and the save still reports its
        // target path. The restored contents are the pre-write snapshot.
        assert_eq!(checks.get(), 1);
        let content: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(content, json!({"v": 2}));
    }

    #[test]
    fn save_to_project_scope_creates_dirs() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let root = temp.path().join("repo");
        std::fs::create_dir_all(&root).unwrap();

        let path = store
            .save(&json!({"enabled": false}), Scope::Local, Some(&root))
            .unwrap();
        assert!(path.is_file());
        assert_eq!(
            store.load_scope(Scope::Local, Some(&root)),
            Some(json!({"enabled": false}))
        );
    }
}
