//! Sound pack resolution and cross-platform playback.
//!
//! Playback is fire-and-forget: players are spawned detached with all stdio
//! suppressed and never awaited. Every failure path reports a
//! [`DispatchOutcome`] instead of an error so a missing audio backend can
//! never block or crash the calling process.

use crate::config::ConfigPaths;
use crate::platform::{Platform, PlatformInfo};
use crate::types::{DispatchOutcome, Event};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A sound pack manifest, `<pack>/manifest.json`.
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    events: HashMap<String, ManifestEntry>,
}

/// One manifest event entry: a bare filename or a rotation set.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ManifestEntry {
    File(String),
    Rotation {
        files: Vec<String>,
        #[serde(default)]
        rotation: Option<String>,
    },
}

impl ManifestEntry {
    fn pick(&self) -> Option<&str> {
        match self {
            ManifestEntry::File(name) => Some(name),
            ManifestEntry::Rotation { files, rotation } => {
                if files.is_empty() {
                    return None;
                }
                let index = if rotation.as_deref() == Some("random") {
                    // Clock-seeded pick; real randomness is overkill here.
                    let nanos = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .map(|d| d.subsec_nanos() as usize)
                        .unwrap_or(0);
                    nanos % files.len()
                } else {
                    0
                };
                files.get(index).map(String::as_str)
            }
        }
    }
}

/// Resolve the sound file for an event: user packs dir first, then the
/// plugin's bundled sounds (`DDING_DONG_PLUGIN_ROOT/sounds/`).
pub fn resolve_sound(
    event: Event,
    pack: &str,
    paths: &ConfigPaths,
    plugin_root: Option<&Path>,
) -> Option<PathBuf> {
    let mut manifest_paths = vec![paths.packs_dir().join(pack).join("manifest.json")];
    if let Some(root) = plugin_root {
        manifest_paths.push(root.join("sounds").join(pack).join("manifest.json"));
    }

    for manifest_path in manifest_paths {
        let Ok(content) = std::fs::read_to_string(&manifest_path) else {
            continue;
        };
        let Ok(manifest) = serde_json::from_str::<Manifest>(&content) else {
            continue;
        };
        let Some(filename) = manifest
            .events
            .get(event.as_str())
            .and_then(ManifestEntry::pick)
        else {
            continue;
        };
        let file = manifest_path.with_file_name(filename);
        if file.is_file() {
            return Some(file);
        }
    }
    None
}

/// Play the sound configured for `event`, detached.
pub fn play_sound(
    event: Event,
    config: &Value,
    info: &PlatformInfo,
    paths: &ConfigPaths,
) -> DispatchOutcome {
    let Some(player) = &info.audio_player else {
        return DispatchOutcome::Skipped("no audio player detected");
    };

    let pack = config["sound"]["pack"].as_str().unwrap_or("default");
    let volume = config["sound"]["volume"].as_f64().unwrap_or(0.7);
    let plugin_root = std::env::var("DDING_DONG_PLUGIN_ROOT")
        .ok()
        .map(PathBuf::from);

    let Some(file) = resolve_sound(event, pack, paths, plugin_root.as_deref()) else {
        return DispatchOutcome::Skipped("no sound file for event");
    };

    match info.platform {
        Platform::Macos => spawn_detached(
            &player.path,
            &["-v".into(), volume.to_string(), path_arg(&file)],
        ),
        Platform::Wsl => play_wsl(&file, volume),
        Platform::Linux => {
            let args = linux_args(&player.name, &file, volume);
            spawn_detached(&player.path, &args)
        }
        Platform::Windows | Platform::Unknown => {
            DispatchOutcome::Skipped("no playback backend for platform")
        }
    }
}

/// Play an arbitrary file directly (pack preview).
pub fn play_file(file: &Path, info: &PlatformInfo) -> DispatchOutcome {
    let Some(player) = &info.audio_player else {
        return DispatchOutcome::Skipped("no audio player detected");
    };
    match info.platform {
        Platform::Macos => spawn_detached(&player.path, &["-v".into(), "0.7".into(), path_arg(file)]),
        Platform::Wsl => play_wsl(file, 0.7),
        Platform::Linux => {
            let args = linux_args(&player.name, file, 0.7);
            spawn_detached(&player.path, &args)
        }
        Platform::Windows | Platform::Unknown => {
            DispatchOutcome::Skipped("no playback backend for platform")
        }
    }
}

fn linux_args(player_name: &str, file: &Path, volume: f64) -> Vec<String> {
    let percent = (volume * 100.0).round() as i64;
    match player_name {
        "ffplay" => vec![
            "-nodisp".into(),
            "-autoexit".into(),
            "-volume".into(),
            percent.to_string(),
            path_arg(file),
        ],
        "mpv" => vec![
            format!("--volume={percent}"),
            "--no-video".into(),
            path_arg(file),
        ],
        // pw-play, paplay, aplay take no volume argument.
        _ => vec![path_arg(file)],
    }
}

fn play_wsl(file: &Path, volume: f64) -> DispatchOutcome {
    // The Windows side needs a Windows path.
    let win_path = match Command::new("wslpath").arg("-w").arg(file).output() {
        Ok(out) if out.status.success() => {
            String::from_utf8_lossy(&out.stdout).trim().to_string()
        }
        _ => return DispatchOutcome::Skipped("wslpath translation failed"),
    };

    let script = format!(
        "Add-Type -AssemblyName PresentationCore\n\
         $p = New-Object System.Windows.Media.MediaPlayer\n\
         $p.Open([Uri]::new('{}'))\n\
         $p.Volume = {volume}\n\
         $p.Play()\n\
         Start-Sleep -Milliseconds 2000\n\
         $p.Close()",
        win_path.replace('\'', "''"),
    );
    spawn_detached(
        Path::new("powershell.exe"),
        &["-NoProfile".into(), "-Command".into(), script],
    )
}

fn spawn_detached(program: &Path, args: &[String]) -> DispatchOutcome {
    match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        // Child is intentionally not awaited.
        Ok(_child) => DispatchOutcome::Delivered,
        Err(err) => DispatchOutcome::Failed(format!("{}: {err}", program.display())),
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
