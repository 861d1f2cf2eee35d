//! Timestamped backups of configuration files.
//!
//! Every successful save snapshots the previous file contents as
//! `<original>.backup.<timestamp>`. Only the newest [`RETAINED_BACKUPS`]
//! snapshots are kept per original; the newest one is consulted when a
//! just-written file fails its round-trip check.

use chrono::Local;
use std::io;
use std::path::{Path, PathBuf};

/// How many backups to retain per original file.
pub const RETAINED_BACKUPS: usize = 3;

/// Fixed-width compact timestamp so lexical ordering equals chronological.
fn backup_timestamp() -> String {
    Local::now().format("%Y%m%d%H%M%S%9f").to_string()
}

fn backup_prefix(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    Some(format!("{name}.backup."))
}

/// Snapshot `path` next to itself. Returns the backup path.
pub fn create_backup(path: &Path) -> io::Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let backup = path.with_file_name(format!("{name}.backup.{}", backup_timestamp()));
    std::fs::copy(path, &backup)?;
    Ok(backup)
}

/// All backups of `path`, sorted oldest first.
pub fn list_backups(path: &Path) -> Vec<PathBuf> {
    let Some(prefix) = backup_prefix(path) else {
        return Vec::new();
    };
    let Some(parent) = path.parent() else {
        return Vec::new();
    };
    let Ok(entries) = std::fs::read_dir(parent) else {
        return Vec::new();
    };

    let mut backups: Vec<PathBuf> = entries
        .flatten()
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|n| n.starts_with(&prefix))
        })
        .map(|e| e.path())
        .collect();
    backups.sort();
    backups
}

/// Delete all but the `keep` newest backups of `path`. Best effort: delete
/// failures are ignored. Returns how many were removed.
pub fn prune_backups(path: &Path, keep: usize) -> usize {
    let backups = list_backups(path);
    if backups.len() <= keep {
        return 0;
    }
    let excess = backups.len() - keep;
    let mut removed = 0;
    for stale in &backups[..excess] {
        if std::fs::remove_file(stale).is_ok() {
            removed += 1;
        }
    }
    removed
}

/// The most recent backup of `path`, if any.
pub fn latest_backup(path: &Path) -> Option<PathBuf> {
    list_backups(path).pop()
}

/// Copy the newest backup over `path`. Returns `Ok(false)` when there is no
/// backup to restore from.
pub fn restore_latest(path: &Path) -> io::Result<bool> {
    match latest_backup(path) {
        Some(backup) => {
            std::fs::copy(&backup, path)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
