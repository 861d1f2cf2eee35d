//! Platform, audio player, and notifier detection.
//!
//! Detection results are owned by a [`Detection`] service instance: computed
//! lazily on first use, cached for the life of the instance, and resettable
//! for tests. Nothing here is module-level mutable state.

use serde::Serialize;
use std::cell::OnceCell;
use std::path::PathBuf;
use std::process::Command;

/// Linux audio players, tried in order.
const LINUX_PLAYERS: [&str; 5] = ["pw-play", "paplay", "ffplay", "mpv", "aplay"];

/// Host platform as far as dispatch is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Macos,
    Linux,
    Wsl,
    Windows,
    Unknown,
}

/// A detected external tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tool {
    pub name: String,
    pub path: PathBuf,
}

impl Tool {
    fn new(name: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
        }
    }
}

/// Everything dispatch needs to know about the host.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformInfo {
    pub platform: Platform,
    #[serde(rename = "audioPlayer")]
    pub audio_player: Option<Tool>,
    pub notifier: Option<Tool>,
}

/// Lazily-computed detection service.
#[derive(Debug, Default)]
pub struct Detection {
    cached: OnceCell<PlatformInfo>,
}

impl Detection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run detection on first use; cached afterwards.
    pub fn info(&self) -> &PlatformInfo {
        self.cached.get_or_init(detect_all)
    }

    /// Drop the cached result so the next call re-detects (tests).
    pub fn reset(&mut self) {
        self.cached = OnceCell::new();
    }
}

fn detect_all() -> PlatformInfo {
    let platform = detect_platform();
    PlatformInfo {
        platform,
        audio_player: detect_audio_player(platform),
        notifier: detect_notifier(platform),
    }
}

/// Identify the host platform. WSL is Linux whose kernel version string
/// mentions Microsoft.
pub fn detect_platform() -> Platform {
    if cfg!(target_os = "macos") {
        Platform::Macos
    } else if cfg!(target_os = "windows") {
        Platform::Windows
    } else if cfg!(target_os = "linux") {
        let is_wsl = std::fs::read_to_string("/proc/version")
            .map(|v| v.to_lowercase().contains("microsoft"))
            .unwrap_or(false);
        if is_wsl { Platform::Wsl } else { Platform::Linux }
    } else {
        Platform::Unknown
    }
}

/// Find the audio player for `platform`, if any.
pub fn detect_audio_player(platform: Platform) -> Option<Tool> {
    match platform {
        Platform::Macos => Some(Tool::new(
            "afplay",
            which("afplay").unwrap_or_else(|| PathBuf::from("afplay")),
        )),
        // WSL plays through the Windows side regardless of WSLg.
        Platform::Wsl => Some(Tool::new("powershell-mediaplayer", "powershell.exe")),
        Platform::Linux => LINUX_PLAYERS
            .iter()
            .find_map(|name| which(name).map(|path| Tool::new(name, path))),
        Platform::Windows | Platform::Unknown => None,
    }
}

/// Find the desktop notifier for `platform`, if any.
pub fn detect_notifier(platform: Platform) -> Option<Tool> {
    match platform {
        Platform::Macos => Some(Tool::new(
            "osascript",
            which("osascript").unwrap_or_else(|| PathBuf::from("osascript")),
        )),
        Platform::Linux => which("notify-send").map(|path| Tool::new("notify-send", path)),
        Platform::Wsl => which("wsl-notify-send")
            .or_else(|| which("wsl-notify-send.exe"))
            .map(|path| Tool::new("wsl-notify-send", path))
            .or_else(|| Some(Tool::new("powershell-winrt", "powershell.exe"))),
        Platform::Windows | Platform::Unknown => None,
    }
}

/// Locate a command on PATH via `which`.
pub fn which(cmd: &str) -> Option<PathBuf> {
    let output = Command::new("which").arg(cmd).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_is_cached_per_instance() {
        let detection = Detection::new();
        let first = detection.info().platform;
        assert_eq!(detection.info().platform, first);
    }

    #[test]
    fn reset_allows_re_detection() {
        let mut detection = Detection::new();
        let before = detection.info().platform;
        detection.reset();
        assert_eq!(detection.info().platform, before);
    }

    #[test]
    fn which_finds_common_tools() {
        // `sh` exists on every unix CI box.
        #[cfg(unix)]
        assert!(which("sh").is_some());
        assert!(which("definitely-not-a-real-binary-xyz").is_none());
    }

    #[test]
    fn platform_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Platform::Macos).unwrap(),
            serde_json::json!("macos")
        );
    }
}
