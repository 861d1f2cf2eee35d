//! Setup-meta subcommand: stamp setup metadata into the global config.

use crate::config::{ConfigStore, META_KEY, Scope};
use crate::error::CliError;
use chrono::Utc;
use clap::Args;
use serde_json::{Map, Value, json};

/// Arguments for the setup-meta subcommand
#[derive(Args, Debug)]
pub struct SetupMetaArgs {
    /// Version to record (defaults to this binary's version)
    #[arg(long)]
    pub version: Option<String>,
}

pub fn run(args: &SetupMetaArgs, store: &ConfigStore) -> Value {
    let version = args
        .version
        .clone()
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    let meta = json!({
        "setupCompleted": true,
        "setupVersion": version,
        "setupDate": Utc::now().to_rfc3339(),
    });

    // Stamp into the raw global file; other keys are left untouched.
    let mut document = store
        .load_scope(Scope::Global, None)
        .filter(Value::is_object)
        .unwrap_or_else(|| Value::Object(Map::new()));
    if let Some(map) = document.as_object_mut() {
        map.insert(META_KEY.to_string(), meta.clone());
    }

    match store.save(&document, Scope::Global, None) {
        Ok(_path) => json!({ "success": true, "meta": meta }),
        Err(err) => CliError::from(err).to_json(),
    }
}
