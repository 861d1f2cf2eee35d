//! Structured error types for CLI responses.
//!
//! Every subcommand emits a single JSON object on stdout, even on failure.
//! Handled errors serialize as `{"error": "<code>", ...}` with a stable
//! snake_case code so hook integrations can branch on them; the process still
//! exits 0 (errors are data, not process failures).

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Stable error codes emitted in the `error` field of CLI responses.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No key argument was supplied.
    NoKey,
    /// The key does not exist in the merged configuration.
    NotFound,
    /// The key is not part of the default schema.
    InvalidKey,
    /// The key resolves to a whole subtree, not a settable leaf.
    ObjectKey,
    /// Project or local scope was requested but no project root was found.
    NoProjectRoot,
    /// The supplied document is not valid JSON.
    InvalidJson,
    /// The event name is not one of the known lifecycle events.
    UnknownEvent,
    /// Missing or malformed command arguments.
    Usage,
    /// Unexpected internal failure (I/O, serialization).
    Internal,
}

/// Structured error for CLI responses.
///
/// Serializes to the wire shape consumed by hook integrations, e.g.
/// `{"error":"invalid_key","key":"sound.x","validKeys":[...]}`.
#[derive(Debug, Serialize)]
pub struct CliError {
    #[serde(rename = "error")]
    pub code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "validKeys", skip_serializing_if = "Option::is_none")]
    pub valid_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CliError {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            key: None,
            valid_keys: None,
            message: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    // Convenience constructors

    pub fn no_key() -> Self {
        Self::new(ErrorCode::NoKey)
    }

    pub fn not_found(key: &str) -> Self {
        Self::new(ErrorCode::NotFound).with_key(key)
    }

    pub fn invalid_key(key: &str, valid_keys: Vec<String>) -> Self {
        let mut err = Self::new(ErrorCode::InvalidKey).with_key(key);
        err.valid_keys = Some(valid_keys);
        err
    }

    pub fn object_key(key: &str) -> Self {
        Self::new(ErrorCode::ObjectKey).with_key(key)
    }

    pub fn no_project_root() -> Self {
        Self::new(ErrorCode::NoProjectRoot)
    }

    pub fn invalid_json(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InvalidJson).with_message(err.to_string())
    }

    pub fn unknown_event(name: &str, valid: &[&str]) -> Self {
        Self::new(ErrorCode::UnknownEvent)
            .with_key(name)
            .with_message(format!("valid events: {}", valid.join(", ")))
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Usage).with_message(message)
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::Internal).with_message(err.to_string())
    }

    /// Serialize into the JSON object written to stdout.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            serde_json::json!({ "error": "internal" })
        })
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.key, &self.message) {
            (Some(key), Some(msg)) => write!(f, "{:?}: {} ({})", self.code, key, msg),
            (Some(key), None) => write!(f, "{:?}: {}", self.code, key),
            (None, Some(msg)) => write!(f, "{:?}: {}", self.code, msg),
            (None, None) => write!(f, "{:?}", self.code),
        }
    }
}

impl std::error::Error for CliError {}

/// Internal errors for the configuration store.
///
/// These stay inside the library; the CLI layer converts them into
/// [`CliError`] responses.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("project or local scope requires a project root")]
    NoProjectRoot,

    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoProjectRoot => CliError::no_project_root(),
            other => CliError::internal(other),
        }
    }
}

/// Result type for configuration store operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
