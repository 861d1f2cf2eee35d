//! Play subcommand: direct playback of a sound file (pack preview).

use crate::error::{CliError, ErrorCode};
use crate::platform::Detection;
use crate::player::play_file;
use crate::types::DispatchOutcome;
use clap::Args;
use serde_json::{Value, json};
use std::path::PathBuf;

/// Arguments for the play subcommand
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Path to a sound file
    pub file: Option<PathBuf>,
}

pub fn run(args: &PlayArgs) -> Value {
    let Some(file) = args.file.as_deref() else {
        return CliError::usage("usage: dding-dong play <file>").to_json();
    };
    if !file.is_file() {
        return CliError::new(ErrorCode::NotFound)
            .with_message(format!("no such file: {}", file.display()))
            .to_json();
    }

    let detection = Detection::new();
    match play_file(file, detection.info()) {
        DispatchOutcome::Delivered => json!({
            "success": true,
            "file": file,
            "result": "playing",
        }),
        DispatchOutcome::Skipped(reason) => json!({
            "success": true,
            "file": file,
            "result": "skipped",
            "reason": reason,
        }),
        DispatchOutcome::Failed(reason) => json!({
            "success": false,
            "file": file,
            "result": "failed",
            "reason": reason,
        }),
    }
}
