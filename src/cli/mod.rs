//! CLI command definitions for dding-dong.
//!
//! This module defines the CLI structure using clap's derive macros. Every
//! subcommand writes a single JSON object to stdout; stderr carries logs.
//! Handled errors exit 0 (errors are data); only `verify` uses a non-zero
//! exit to signal an invalid configuration.

pub mod doctor;
pub mod get;
pub mod hook;
pub mod notify;
pub mod play;
pub mod save;
pub mod set;
pub mod setup;
pub mod verify;

use clap::{Parser, Subcommand};
use doctor::DoctorArgs;
use get::GetArgs;
use hook::HookArgs;
use notify::NotifyArgs;
use play::PlayArgs;
use save::SaveArgs;
use set::SetArgs;
use setup::SetupMetaArgs;
use verify::VerifyArgs;

/// Sound and desktop notifications for AI coding assistant lifecycle events
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a config value by dotted key from the merged view
    Get(GetArgs),

    /// Set a config value by dotted key at a scope
    Set(SetArgs),

    /// Save a whole config document for a scope
    Save(SaveArgs),

    /// Report setup status, merged config, paths, and platform detection
    Doctor(DoctorArgs),

    /// Validate the merged configuration and scope file consistency
    Verify(VerifyArgs),

    /// Stamp setup metadata into the global config
    SetupMeta(SetupMetaArgs),

    /// Dispatch a lifecycle event (or all of them as a test run)
    Notify(NotifyArgs),

    /// Play a sound file directly (pack preview)
    Play(PlayArgs),

    /// Run as a hook: read the host event from stdin, dispatch, respond
    Hook(HookArgs),
}
