//! Validated get/set operations over the layered configuration.
//!
//! The setter validates a dotted key against the default schema before any
//! write happens: unknown keys report the full set of valid leaf paths, and
//! keys addressing a whole subtree are rejected. Writes go to the raw file of
//! the target scope only, inheriting the store's backup and round-trip
//! guarantees.

use super::keypath::{coerce_value, collect_leaf_keys, resolve_path, set_at_path};
use super::root::find_project_root;
use super::schema::{META_KEY, default_config};
use super::store::ConfigStore;
use super::Scope;
use crate::error::CliError;
use serde_json::{Map, Value};
use std::path::Path;

/// Result of a successful scoped set.
#[derive(Debug, Clone)]
pub struct SetOutcome {
    pub key: String,
    /// Previous value as seen through the merged view (`null` when unset).
    pub old_value: Value,
    pub new_value: Value,
    pub scope: Scope,
}

impl ConfigStore {
    /// Read a value from the merged view by dotted key.
    pub fn get_key(&self, key: &str, cwd: Option<&Path>) -> Option<Value> {
        let merged = self.resolve(cwd);
        resolve_path(&merged, key).map(|r| r.value.clone())
    }

    /// Set a leaf value by dotted key in the raw file of `scope`.
    ///
    /// Validation and coercion happen before any file is touched.
    pub fn set_key(
        &self,
        key: &str,
        raw_value: &str,
        scope: Scope,
        cwd: Option<&Path>,
    ) -> Result<SetOutcome, CliError> {
        // Validate against the default schema, which defines the valid keys.
        let defaults = default_config();
        let Some(resolved) = resolve_path(&defaults, key) else {
            return Err(CliError::invalid_key(key, collect_leaf_keys(&defaults)));
        };
        if resolved.value.is_object() {
            return Err(CliError::object_key(key));
        }
        let segments = resolved.segments;
        let new_value = coerce_value(raw_value);

        // Old value comes from the merged view, not the raw scope file.
        let old_value = self.get_key(key, cwd).unwrap_or(Value::Null);

        let project_root = if scope.requires_project_root() {
            Some(
                cwd.and_then(find_project_root)
                    .ok_or_else(CliError::no_project_root)?,
            )
        } else {
            None
        };

        // Load only the raw target file; missing or corrupt starts fresh.
        let mut document = self
            .load_scope(scope, project_root.as_deref())
            .filter(Value::is_object)
            .unwrap_or_else(|| Value::Object(Map::new()));

        // _meta is held aside during the edit and belongs to global only.
        let meta = document
            .as_object_mut()
            .and_then(|map| map.remove(META_KEY));

        set_at_path(&mut document, &segments, new_value.clone());

        if scope == Scope::Global
            && let (Some(meta), Some(map)) = (meta, document.as_object_mut())
        {
            map.insert(META_KEY.to_string(), meta);
        }

        self.save(&document, scope, project_root.as_deref())
            .map_err(CliError::from)?;

        Ok(SetOutcome {
            key: key.to_string(),
            old_value,
            new_value,
            scope,
        })
    }
}
