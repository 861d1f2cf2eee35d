//! The default configuration schema.
//!
//! A complete, hardcoded schema instance. It is always the first merge layer
//! and defines the set of keys a scoped setter may touch.

use serde_json::{Value, json};

/// Key of the setup metadata sidecar fragment.
///
/// `_meta` lives only in the global file and is excluded from deep merge:
/// the resolver detaches it before merging and reattaches it verbatim after,
/// so project overrides can never corrupt it.
pub const META_KEY: &str = "_meta";

/// Build the default configuration document.
///
/// Event keys contain literal dots (`task.complete`), which the dotted
/// key-path resolver handles via backtracking.
pub fn default_config() -> Value {
    json!({
        "enabled": true,
        "language": "ko",
        "sound": {
            "enabled": true,
            "pack": "default",
            "volume": 0.7,
            "events": {
                "task.complete": true,
                "task.error": true,
                "input.required": true,
                "session.start": false,
                "session.end": false
            }
        },
        "notification": {
            "enabled": true,
            "events": {
                "task.complete": true,
                "task.error": true,
                "input.required": true,
                "session.start": false,
                "session.end": false
            }
        },
        "messages": {
            "task.complete": "작업이 완료되었습니다!",
            "task.error": "오류가 발생했습니다",
            "input.required": "확인이 필요합니다",
            "session.start": "코딩을 시작합니다",
            "session.end": "세션이 종료되었습니다"
        },
        "quiet_hours": {
            "enabled": false,
            "start": "22:00",
            "end": "08:00"
        },
        "cooldown_seconds": 3
    })
}
