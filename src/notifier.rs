//! OS notification delivery.
//!
//! Foreground helpers (osascript, notify-send) are bounded by a 4 second
//! timeout; the WSL WinRT toast is spawned detached to sidestep PowerShell
//! startup latency. Failed deliveries degrade to a terminal bell on stderr;
//! stdout stays reserved for the JSON response.

use crate::platform::{Platform, PlatformInfo};
use crate::types::DispatchOutcome;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Upper bound on waiting for a foreground notifier helper.
const NOTIFY_TIMEOUT: Duration = Duration::from_secs(4);

/// Deliver a desktop notification, falling back to a terminal bell.
pub fn send_notification(title: &str, message: &str, info: &PlatformInfo) -> DispatchOutcome {
    let outcome = match info.platform {
        Platform::Macos => send_macos(title, message),
        Platform::Linux => send_linux(title, message, info),
        Platform::Wsl => send_wsl(title, message, info),
        Platform::Windows | Platform::Unknown => {
            DispatchOutcome::Skipped("no notifier for platform")
        }
    };

    if bell_needed(&outcome, info.platform) {
        terminal_bell();
    }
    outcome
}

/// Bell only when delivery failed outright or the platform has no notifier
/// at all. A merely missing optional helper (notify-send not installed)
/// stays silent.
fn bell_needed(outcome: &DispatchOutcome, platform: Platform) -> bool {
    match outcome {
        DispatchOutcome::Delivered => false,
        DispatchOutcome::Failed(_) => true,
        DispatchOutcome::Skipped(_) => {
            matches!(platform, Platform::Windows | Platform::Unknown)
        }
    }
}

fn send_macos(title: &str, message: &str) -> DispatchOutcome {
    let script = format!(
        "display notification \"{}\" with title \"{}\"",
        escape_applescript(message),
        escape_applescript(title)
    );
    run_with_timeout(
        Path::new("osascript"),
        &["-e".into(), script],
        NOTIFY_TIMEOUT,
    )
}

fn send_linux(title: &str, message: &str, info: &PlatformInfo) -> DispatchOutcome {
    let Some(notifier) = &info.notifier else {
        return DispatchOutcome::Skipped("notify-send not found");
    };
    run_with_timeout(
        &notifier.path,
        &[
            "-a".into(),
            title.to_string(),
            title.to_string(),
            message.to_string(),
        ],
        NOTIFY_TIMEOUT,
    )
}

fn send_wsl(title: &str, message: &str, info: &PlatformInfo) -> DispatchOutcome {
    if let Some(notifier) = &info.notifier
        && notifier.name == "wsl-notify-send"
    {
        return run_with_timeout(
            &notifier.path,
            &[
                "--category".into(),
                title.to_string(),
                title.to_string(),
                message.to_string(),
            ],
            NOTIFY_TIMEOUT,
        );
    }

    // WinRT toast through PowerShell, detached to avoid its startup cost.
    let script = format!(
        "[Windows.UI.Notifications.ToastNotificationManager, Windows.UI.Notifications, ContentType=WindowsRuntime] | Out-Null\n\
         $t = [Windows.UI.Notifications.ToastNotificationManager]::GetTemplateContent('ToastText02')\n\
         $t.SelectSingleNode('//text[@id=1]').InnerText = '{}'\n\
         $t.SelectSingleNode('//text[@id=2]').InnerText = '{}'\n\
         [Windows.UI.Notifications.ToastNotificationManager]::CreateToastNotifier('PowerShell').Show([Windows.UI.Notifications.ToastNotification]::new($t))",
        escape_posh(title),
        escape_posh(message)
    );
    match Command::new("powershell.exe")
        .args(["-NoProfile", "-Command", &script])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(_child) => DispatchOutcome::Delivered,
        Err(err) => DispatchOutcome::Failed(format!("powershell.exe: {err}")),
    }
}

/// Run a helper to completion with a wall-clock bound, killing it on timeout.
fn run_with_timeout(program: &Path, args: &[String], timeout: Duration) -> DispatchOutcome {
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => return DispatchOutcome::Failed(format!("{}: {err}", program.display())),
    };

    let started = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                return if status.success() {
                    DispatchOutcome::Delivered
                } else {
                    DispatchOutcome::Failed(format!("{} exited with {status}", program.display()))
                };
            }
            Ok(None) => {
                if started.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return DispatchOutcome::Failed(format!("{} timed out", program.display()));
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(err) => return DispatchOutcome::Failed(format!("{}: {err}", program.display())),
        }
    }
}

fn terminal_bell() {
    use std::io::Write;
    let mut stderr = std::io::stderr();
    let _ = stderr.write_all(b"\x07");
    let _ = stderr.flush();
}

fn escape_applescript(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn escape_posh(s: &str) -> String {
    s.replace('\'', "''")
}
