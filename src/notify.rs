//! Unified notification entry point.
//!
//! Consumes the resolved configuration to decide whether and what to play or
//! display. Everything downstream of resolution is best effort: dispatch
//! outcomes are logged, never propagated, so a hook invocation can never be
//! broken by a missing audio backend.

use crate::config::ConfigStore;
use crate::messages::message_for;
use crate::notifier::send_notification;
use crate::platform::Detection;
use crate::player::play_sound;
use crate::state::{NotifyState, load_state, save_state};
use crate::types::{DispatchOutcome, Event};
use chrono::{Local, Timelike, Utc};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

const NOTIFICATION_TITLE: &str = "dding-dong";

/// Per-invocation context for a notification.
#[derive(Debug, Default)]
pub struct NotifyContext<'a> {
    /// Working directory used for project scope discovery.
    pub cwd: Option<&'a Path>,
    /// Message override (pack preview, tests).
    pub message: Option<String>,
}

/// What the dispatcher decided to do, for CLI reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyDecision {
    /// At least one channel was attempted.
    Dispatched,
    /// Notifications are disabled in the effective config.
    Disabled,
    /// Inside the configured quiet-hours window.
    QuietHours,
    /// Within the cooldown window of the previous notification.
    CoolingDown,
}

impl NotifyDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyDecision::Dispatched => "dispatched",
            NotifyDecision::Disabled => "disabled",
            NotifyDecision::QuietHours => "quiet_hours",
            NotifyDecision::CoolingDown => "cooling_down",
        }
    }
}

/// Dispatch one lifecycle event.
pub fn notify(store: &ConfigStore, event: Event, ctx: &NotifyContext) -> NotifyDecision {
    let config = store.resolve(ctx.cwd);

    if config["enabled"].as_bool() == Some(false) {
        return NotifyDecision::Disabled;
    }

    let now = Local::now();
    if in_quiet_hours(&config["quiet_hours"], now.hour() * 60 + now.minute()) {
        return NotifyDecision::QuietHours;
    }

    let state = load_state(store.paths());
    let now_ms = Utc::now().timestamp_millis();
    let cooldown = config["cooldown_seconds"].as_f64().unwrap_or(0.0);
    if is_cooling_down(&state, cooldown, now_ms) {
        return NotifyDecision::CoolingDown;
    }

    let language = config["language"].as_str().unwrap_or("ko");
    let message = ctx
        .message
        .clone()
        .unwrap_or_else(|| message_for(event, language, &config["messages"]));

    let detection = Detection::new();
    let info = detection.info();

    if channel_enabled(&config["sound"], event) {
        log_outcome("sound", play_sound(event, &config, info, store.paths()));
    }
    if channel_enabled(&config["notification"], event) {
        log_outcome(
            "notification",
            send_notification(NOTIFICATION_TITLE, &message, info),
        );
    }

    save_state(
        store.paths(),
        &NotifyState {
            last_notified_at: Some(now_ms),
        },
    );
    NotifyDecision::Dispatched
}

/// A channel fires unless globally disabled or the per-event toggle is
/// explicitly false (an absent toggle means on).
fn channel_enabled(channel: &Value, event: Event) -> bool {
    if channel["enabled"].as_bool() == Some(false) {
        return false;
    }
    if !channel.is_object() {
        return false;
    }
    channel["events"][event.as_str()].as_bool() != Some(false)
}

/// Quiet-hours check over minutes-of-day, handling windows that wrap past
/// midnight (e.g. 22:00-08:00).
fn in_quiet_hours(quiet: &Value, current_minutes: u32) -> bool {
    if quiet["enabled"].as_bool() != Some(true) {
        return false;
    }
    let (Some(start), Some(end)) = (
        quiet["start"].as_str().and_then(parse_hhmm),
        quiet["end"].as_str().and_then(parse_hhmm),
    ) else {
        return false;
    };
    if start > end {
        current_minutes >= start || current_minutes < end
    } else {
        current_minutes >= start && current_minutes < end
    }
}

fn parse_hhmm(s: &str) -> Option<u32> {
    let (h, m) = s.split_once(':')?;
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

fn is_cooling_down(state: &NotifyState, cooldown_seconds: f64, now_ms: i64) -> bool {
    if cooldown_seconds <= 0.0 {
        return false;
    }
    let Some(last) = state.last_notified_at else {
        return false;
    };
    (now_ms - last) < (cooldown_seconds * 1000.0) as i64
}

fn log_outcome(channel: &str, outcome: DispatchOutcome) {
    match outcome {
        DispatchOutcome::Delivered => debug!(channel, "dispatched"),
        DispatchOutcome::Skipped(reason) => debug!(channel, reason, "skipped"),
        DispatchOutcome::Failed(reason) => warn!(channel, reason, "dispatch failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quiet_hours_disabled_never_matches() {
        let quiet = json!({"enabled": false, "start": "00:00", "end": "23:59"});
        assert!(!in_quiet_hours(&quiet, 12 * 60));
    }

    #[test]
    fn quiet_hours_same_day_window() {
        let quiet = json!({"enabled": true, "start": "09:00", "end": "17:00"});
        assert!(in_quiet_hours(&quiet, 9 * 60));
        assert!(in_quiet_hours(&quiet, 12 * 60));
        assert!(!in_quiet_hours(&quiet, 17 * 60));
        assert!(!in_quiet_hours(&quiet, 8 * 60 + 59));
    }

    #[test]
    fn quiet_hours_wraps_past_midnight() {
        let quiet = json!({"enabled": true, "start": "22:00", "end": "08:00"});
        assert!(in_quiet_hours(&quiet, 23 * 60));
        assert!(in_quiet_hours(&quiet, 3 * 60));
        assert!(!in_quiet_hours(&quiet, 12 * 60));
        assert!(!in_quiet_hours(&quiet, 8 * 60));
    }

    #[test]
    fn malformed_quiet_hours_never_match() {
        let quiet = json!({"enabled": true, "start": "25:00", "end": "08:00"});
        assert!(!in_quiet_hours(&quiet, 0));
        let quiet = json!({"enabled": true});
        assert!(!in_quiet_hours(&quiet, 0));
    }

    #[test]
    fn cooldown_window() {
        let state = NotifyState {
            last_notified_at: Some(10_000),
        };
        assert!(is_cooling_down(&state, 3.0, 12_000));
        assert!(!is_cooling_down(&state, 3.0, 13_000));
        assert!(!is_cooling_down(&state, 0.0, 10_001));
        assert!(!is_cooling_down(&NotifyState::default(), 3.0, 12_000));
    }

    #[test]
    fn channel_toggles() {
        let channel = json!({
            "enabled": true,
            "events": {"task.complete": true, "session.start": false}
        });
        assert!(channel_enabled(&channel, Event::TaskComplete));
        assert!(!channel_enabled(&channel, Event::SessionStart));
        // Absent toggle means on.
        assert!(channel_enabled(&channel, Event::TaskError));

        let disabled = json!({"enabled": false, "events": {"task.complete": true}});
        assert!(!channel_enabled(&disabled, Event::TaskComplete));

        // Deleted channel subtree (null override) disables it.
        assert!(!channel_enabled(&Value::Null, Event::TaskComplete));
    }
}
