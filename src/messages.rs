//! Notification message text.
//!
//! Per-event overrides from the `messages` config block win over the built-in
//! language tables; an unknown language falls back to English.

use crate::types::Event;
use serde_json::Value;

fn korean(event: Event) -> &'static str {
    match event {
        Event::TaskComplete => "작업이 완료되었습니다!",
        Event::TaskError => "오류가 발생했습니다",
        Event::InputRequired => "확인이 필요합니다",
        Event::SessionStart => "코딩을 시작합니다",
        Event::SessionEnd => "세션이 종료되었습니다",
    }
}

fn english(event: Event) -> &'static str {
    match event {
        Event::TaskComplete => "Task completed!",
        Event::TaskError => "Error occurred",
        Event::InputRequired => "Your input is needed",
        Event::SessionStart => "Session started",
        Event::SessionEnd => "Session ended",
    }
}

/// Pick the message for `event`.
///
/// `overrides` is the merged `messages` config block (may be any JSON shape;
/// non-string entries are ignored).
pub fn message_for(event: Event, language: &str, overrides: &Value) -> String {
    if let Some(custom) = overrides.get(event.as_str()).and_then(Value::as_str) {
        return custom.to_string();
    }
    match language {
        "ko" => korean(event).to_string(),
        _ => english(event).to_string(),
    }
}
