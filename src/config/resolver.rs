//! Effective configuration resolution.
//!
//! Applies the five layers in strict order: defaults, global, project,
//! project-local, environment. Resolution is a total function: a corrupted or
//! missing optional layer is skipped, and the default schema guarantees a
//! usable result.

use super::merge::deep_merge_all;
use super::root::find_project_root;
use super::schema::{META_KEY, default_config};
use super::store::ConfigStore;
use super::{Scope, keypath::set_at_path};
use serde_json::Value;
use std::path::Path;

/// Environment overrides applied after all file-based layers.
///
/// Captured as data rather than read ambiently so tests can construct them
/// without mutating process state.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    /// `DDING_DONG_ENABLED`: the literal string `"false"` disables.
    pub enabled: Option<String>,
    /// `DDING_DONG_VOLUME`: parsed as a float.
    pub volume: Option<String>,
    /// `DDING_DONG_LANG`: message language.
    pub language: Option<String>,
    /// `DDING_DONG_PACK`: sound pack name.
    pub pack: Option<String>,
}

impl EnvOverrides {
    /// Snapshot the recognized process environment variables.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var("DDING_DONG_ENABLED").ok(),
            volume: std::env::var("DDING_DONG_VOLUME").ok(),
            language: std::env::var("DDING_DONG_LANG").ok(),
            pack: std::env::var("DDING_DONG_PACK").ok(),
        }
    }

    fn apply(&self, config: &mut Value) {
        if self.enabled.as_deref() == Some("false") {
            set_at_path(config, &["enabled".into()], Value::Bool(false));
        }
        if let Some(volume) = self.volume.as_deref().and_then(|v| v.parse::<f64>().ok())
            && volume.is_finite()
        {
            set_at_path(
                config,
                &["sound".into(), "volume".into()],
                Value::from(volume),
            );
        }
        if let Some(lang) = &self.language {
            set_at_path(config, &["language".into()], Value::from(lang.clone()));
        }
        if let Some(pack) = &self.pack {
            set_at_path(
                config,
                &["sound".into(), "pack".into()],
                Value::from(pack.clone()),
            );
        }
    }
}

impl ConfigStore {
    /// Resolve the effective configuration, reading environment overrides
    /// from the process environment.
    pub fn resolve(&self, cwd: Option<&Path>) -> Value {
        self.resolve_with_env(cwd, &EnvOverrides::from_env())
    }

    /// Resolve the effective configuration with explicit overrides.
    ///
    /// `_meta` is detached from the global layer before merging and
    /// reattached verbatim afterwards, so it is never subject to merge
    /// semantics or project-layer interference.
    pub fn resolve_with_env(&self, cwd: Option<&Path>, env: &EnvOverrides) -> Value {
        let mut layers = vec![default_config()];
        let mut meta = None;

        if let Some(mut global) = self.load_scope(Scope::Global, None) {
            if let Some(map) = global.as_object_mut() {
                meta = map.remove(META_KEY);
            }
            layers.push(global);
        }

        // _meta belongs to the global scope alone; a project or local file
        // carrying one is stripped before it can merge in.
        if let Some(root) = cwd.and_then(find_project_root) {
            if let Some(mut project) = self.load_scope(Scope::Project, Some(&root)) {
                strip_meta(&mut project);
                layers.push(project);
            }
            if let Some(mut local) = self.load_scope(Scope::Local, Some(&root)) {
                strip_meta(&mut local);
                layers.push(local);
            }
        }

        let mut merged = deep_merge_all(layers);
        env.apply(&mut merged);

        if let Some(meta) = meta
            && let Some(map) = merged.as_object_mut()
        {
            map.insert(META_KEY.to_string(), meta);
        }
        merged
    }
}

fn strip_meta(layer: &mut Value) {
    if let Some(map) = layer.as_object_mut() {
        map.remove(META_KEY);
    }
}
