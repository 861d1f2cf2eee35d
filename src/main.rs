//! dding-dong CLI
//!
//! Sound and desktop notifications for AI coding assistant lifecycle
//! events. Each invocation is a short-lived, single-threaded process:
//! parse arguments, resolve configuration, run one subcommand, emit one
//! JSON object on stdout.

use anyhow::Result;
use clap::Parser;
use dding_dong::cli::{Cli, Command};
use dding_dong::config::ConfigStore;
use serde_json::Value;
use std::fs::OpenOptions;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option. Logs go to stderr or a
    // file; stdout carries only the JSON response.
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let store = ConfigStore::discover();

    let (body, exit_code): (Value, i32) = match &cli.command {
        Command::Get(args) => (dding_dong::cli::get::run(args, &store), 0),
        Command::Set(args) => (dding_dong::cli::set::run(args, &store), 0),
        Command::Save(args) => (dding_dong::cli::save::run(args, &store), 0),
        Command::Doctor(args) => (dding_dong::cli::doctor::run(args, &store), 0),
        Command::Verify(args) => dding_dong::cli::verify::run(args, &store),
        Command::SetupMeta(args) => (dding_dong::cli::setup::run(args, &store), 0),
        Command::Notify(args) => (dding_dong::cli::notify::run(args, &store), 0),
        Command::Play(args) => (dding_dong::cli::play::run(args), 0),
        Command::Hook(args) => (dding_dong::cli::hook::run(args, &store), 0),
    };

    println!("{}", serde_json::to_string(&body)?);
    std::process::exit(exit_code);
}
