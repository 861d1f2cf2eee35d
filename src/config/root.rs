//! Project root discovery.
//!
//! Walks upward from a starting directory looking for a config-bearing
//! directory, falling back to a version-control marker. Each tier is a full
//! independent upward walk: a `.dding-dong/` match anywhere in the ancestry
//! beats a `.git` match at a shallower ancestor.

use super::paths::{ConfigPaths, PROJECT_DIR_NAME};
use std::path::{Path, PathBuf};

/// Upper bound on upward steps, guarding against pathological filesystems
/// (symlink loops, odd root mounts).
pub const MAX_WALK_DEPTH: usize = 10;

/// Find the project root anchoring project and local scopes.
///
/// Returns `None` when no root is discoverable; only global scope applies
/// then. A negative result is not an error.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    find_project_root_with_depth(start, MAX_WALK_DEPTH)
}

/// [`find_project_root`] with an explicit depth bound.
pub fn find_project_root_with_depth(start: &Path, max_depth: usize) -> Option<PathBuf> {
    // Tier 1 is exhausted across the whole ancestry before tier 2 begins.
    walk_up(start, max_depth, has_project_config)
        .or_else(|| walk_up(start, max_depth, has_vcs_marker))
}

fn walk_up(start: &Path, max_depth: usize, matches: fn(&Path) -> bool) -> Option<PathBuf> {
    let mut dir = start;
    for _ in 0..max_depth {
        if matches(dir) {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
    None
}

fn has_project_config(dir: &Path) -> bool {
    dir.join(PROJECT_DIR_NAME).is_dir()
        && (ConfigPaths::project_config_file(dir).is_file()
            || ConfigPaths::project_local_config_file(dir).is_file())
}

fn has_vcs_marker(dir: &Path) -> bool {
    // .git may be a file in worktrees; either form marks a repository.
    dir.join(".git").exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "{}\n").unwrap();
    }

    #[test]
    fn finds_config_bearing_ancestor() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        touch(&repo.join(".dding-dong/config.json"));
        let start = repo.join("src/deep");
        std::fs::create_dir_all(&start).unwrap();

        assert_eq!(find_project_root(&start), Some(repo));
    }

    #[test]
    fn local_only_config_also_marks_a_root() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        touch(&repo.join(".dding-dong/config.local.json"));

        assert_eq!(find_project_root(&repo), Some(repo));
    }

    #[test]
    fn empty_project_dir_does_not_mark_a_root() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        std::fs::create_dir_all(repo.join(".dding-dong")).unwrap();

        assert_eq!(find_project_root(&repo), None);
    }

    #[test]
    fn falls_back_to_git_marker() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        std::fs::create_dir_all(repo.join(".git")).unwrap();
        let start = repo.join("sub");
        std::fs::create_dir_all(&start).unwrap();

        assert_eq!(find_project_root(&start), Some(repo));
    }

    #[test]
    fn config_tier_beats_shallower_git_match() {
        // /repo/.git and /repo/sub/.dding-dong/config.json: starting from
        // /repo/sub/deep the config tier wins even though the .git ancestor
        // is closer to the filesystem root.
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        std::fs::create_dir_all(repo.join(".git")).unwrap();
        let sub = repo.join("sub");
        touch(&sub.join(".dding-dong/config.json"));
        let start = sub.join("deep");
        std::fs::create_dir_all(&start).unwrap();

        assert_eq!(find_project_root(&start), Some(sub));
    }

    #[test]
    fn no_match_is_a_negative_result() {
        let temp = TempDir::new().unwrap();
        let start = temp.path().join("plain/dir");
        std::fs::create_dir_all(&start).unwrap();

        assert_eq!(find_project_root_with_depth(&start, 2), None);
    }

    #[test]
    fn depth_bound_stops_the_walk() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        std::fs::create_dir_all(repo.join(".git")).unwrap();
        let start = repo.join("a/b/c/d");
        std::fs::create_dir_all(&start).unwrap();

        // Root is 5 levels up from start (inclusive walk).
        assert_eq!(find_project_root_with_depth(&start, 3), None);
        assert_eq!(find_project_root_with_depth(&start, 5), Some(repo));
    }
}
