//! Physical file locations for each configuration scope.
//!
//! All accessors are pure functions of the base directory and (for project
//! scopes) a project root; there is no hidden state.

use std::path::{Path, PathBuf};

/// Directory name under the user config dir holding global state.
pub const CONFIG_DIR_NAME: &str = "dding-dong";

/// Directory name inside a project root holding project-scoped config.
pub const PROJECT_DIR_NAME: &str = ".dding-dong";

const CONFIG_FILE_NAME: &str = "config.json";
const LOCAL_CONFIG_FILE_NAME: &str = "config.local.json";
const STATE_FILE_NAME: &str = ".state.json";

/// Resolved base directory for global configuration.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    config_dir: PathBuf,
}

impl ConfigPaths {
    /// Discover the global config directory.
    ///
    /// `DDING_DONG_CONFIG_DIR` overrides; otherwise the platform user config
    /// dir (falling back to `~/.config`), suffixed with `dding-dong/`.
    pub fn discover() -> Self {
        let config_dir = std::env::var("DDING_DONG_CONFIG_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME)))
            .or_else(|| dirs::home_dir().map(|h| h.join(".config").join(CONFIG_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from(PROJECT_DIR_NAME));
        Self { config_dir }
    }

    /// Create paths rooted at an explicit directory (tests).
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// The global config directory.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Global configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Cooldown state file. Global scope only, no merge logic.
    pub fn state_file(&self) -> PathBuf {
        self.config_dir.join(STATE_FILE_NAME)
    }

    /// User-installed sound packs.
    pub fn packs_dir(&self) -> PathBuf {
        self.config_dir.join("packs")
    }

    /// Shared project configuration file, meant to be committed.
    pub fn project_config_file(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_DIR_NAME).join(CONFIG_FILE_NAME)
    }

    /// Personal project configuration file, meant to be git-ignored.
    pub fn project_local_config_file(project_root: &Path) -> PathBuf {
        project_root
            .join(PROJECT_DIR_NAME)
            .join(LOCAL_CONFIG_FILE_NAME)
    }

    /// Create the global config and packs directories.
    pub fn ensure_config_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(self.packs_dir())
    }
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::discover()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn accessors_are_pure_functions_of_base_dir() {
        let paths = ConfigPaths::with_config_dir("/tmp/dd-test");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/dd-test/config.json"));
        assert_eq!(paths.state_file(), PathBuf::from("/tmp/dd-test/.state.json"));
        assert_eq!(paths.packs_dir(), PathBuf::from("/tmp/dd-test/packs"));
    }

    #[test]
    fn project_files_hang_off_the_project_root() {
        let root = Path::new("/repo");
        assert_eq!(
            ConfigPaths::project_config_file(root),
            PathBuf::from("/repo/.dding-dong/config.json")
        );
        assert_eq!(
            ConfigPaths::project_local_config_file(root),
            PathBuf::from("/repo/.dding-dong/config.local.json")
        );
    }

    #[test]
    fn ensure_config_dir_creates_packs_too() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_config_dir(temp.path().join("cfg"));
        paths.ensure_config_dir().unwrap();
        assert!(paths.packs_dir().is_dir());
    }
}
