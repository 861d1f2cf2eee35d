//! dding-dong library
//!
//! Sound and desktop notifications for AI coding assistant lifecycle events.
//! This module exports the core components for testing and integration.

pub mod cli;
pub mod config;
pub mod error;
pub mod messages;
pub mod notifier;
pub mod notify;
pub mod platform;
pub mod player;
pub mod state;
pub mod types;
