//! Shared types for lifecycle events and dispatch outcomes.

use std::fmt;
use std::str::FromStr;

/// Lifecycle events that can trigger a notification.
///
/// The wire form uses dotted names (`task.complete`), which also appear as
/// literal keys inside the configuration schema under `sound.events`,
/// `notification.events`, and `messages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    TaskComplete,
    TaskError,
    InputRequired,
    SessionStart,
    SessionEnd,
}

impl Event {
    /// All events, in dispatch-test order.
    pub const ALL: [Event; 5] = [
        Event::TaskComplete,
        Event::TaskError,
        Event::InputRequired,
        Event::SessionStart,
        Event::SessionEnd,
    ];

    /// Dotted wire name, matching the configuration keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::TaskComplete => "task.complete",
            Event::TaskError => "task.error",
            Event::InputRequired => "input.required",
            Event::SessionStart => "session.start",
            Event::SessionEnd => "session.end",
        }
    }

    /// Wire names of all events.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Event::as_str).collect()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Event {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == s)
            .ok_or(())
    }
}

/// Outcome of a best-effort dispatch operation (sound playback, OS
/// notification).
///
/// Helpers report what happened instead of swallowing failures internally;
/// the dispatcher decides per call whether to log and continue. Nothing in
/// dispatch ever propagates an error to the invoking host process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The side effect was handed off to the platform.
    Delivered,
    /// Nothing to do (no backend, no sound file, event toggled off).
    Skipped(&'static str),
    /// The attempt failed; reason is for logging only.
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_round_trips_through_wire_name() {
        for event in Event::ALL {
            assert_eq!(event.as_str().parse::<Event>(), Ok(event));
        }
    }

    #[test]
    fn unknown_event_name_is_rejected() {
        assert!("task.started".parse::<Event>().is_err());
    }
}
