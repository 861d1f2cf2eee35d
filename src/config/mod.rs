//! Layered configuration system.
//!
//! Consolidates configuration from up to five layers with field-by-field JSON
//! merging, applied in strict order:
//! 1. **Defaults** - Complete schema embedded in the binary
//! 2. **Global** - `<user-config-dir>/dding-dong/config.json`
//! 3. **Project** - `<project-root>/.dding-dong/config.json`
//! 4. **Local** - `<project-root>/.dding-dong/config.local.json`
//! 5. **Environment variables** (highest priority)
//!
//! ## Merge Strategy
//! Objects merge key-wise; an explicit `null` in an overlay deletes the key;
//! everything else (arrays included) is replaced wholesale. A missing or
//! malformed optional layer is skipped, never fatal: resolution always
//! produces a usable configuration.
//!
//! ## Environment Variables
//! - `DDING_DONG_ENABLED` - `"false"` disables all notifications
//! - `DDING_DONG_VOLUME` - Sound volume (float)
//! - `DDING_DONG_LANG` - Message language
//! - `DDING_DONG_PACK` - Sound pack name
//! - `DDING_DONG_CONFIG_DIR` - Global config dir (default: user config dir)

mod backup;
mod keypath;
mod merge;
mod paths;
mod resolver;
mod root;
mod schema;
mod setter;
mod store;

pub use backup::{RETAINED_BACKUPS, create_backup, latest_backup, list_backups, prune_backups, restore_latest};
pub use keypath::{ResolvedPath, coerce_value, collect_leaf_keys, resolve_path, set_at_path};
pub use merge::{deep_merge, deep_merge_all};
pub use paths::ConfigPaths;
pub use resolver::EnvOverrides;
pub use root::{MAX_WALK_DEPTH, find_project_root, find_project_root_with_depth};
pub use schema::{META_KEY, default_config};
pub use setter::SetOutcome;
pub use store::ConfigStore;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which physical file backs a configuration fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// User-level file, process-wide.
    Global,
    /// Shared project file, meant to be committed.
    Project,
    /// Personal project file, meant to be git-ignored.
    Local,
}

impl Scope {
    /// Whether this scope is anchored to a discovered project root.
    pub fn requires_project_root(&self) -> bool {
        matches!(self, Scope::Project | Scope::Local)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Project => write!(f, "project"),
            Scope::Local => write!(f, "local"),
        }
    }
}

impl FromStr for Scope {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(Scope::Global),
            "project" => Ok(Scope::Project),
            "local" => Ok(Scope::Local),
            _ => Err(()),
        }
    }
}
