//! Application service — workstation diagnostics.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use crate::application::ports::{CommandRunner, PlatformProbe, ProgressReporter};
use crate::domain::health::{DoctorChecks, ToolCheck};
use crate::domain::platform;

/// External tools rigup shells out to, with the flag used to probe them.
const REQUIRED_TOOLS: &[(&str, &[&str])] = &[
    ("git", &["--version"]),
    ("ssh-keygen", &["-?"]),
    ("ssh-add", &["-?"]),
];

/// Clipboard tools probed with a harmless version/help flag so detection
/// never overwrites the operator's clipboard.
const CLIPBOARD_PROBES: &[(&str, &[&str])] = &[
    ("wl-copy", &["--version"]),
    ("xclip", &["-version"]),
    ("clip.exe", &["/?"]),
];

/// Run the full diagnostic sweep.
///
/// Every probe degrades to "not found" instead of failing the sweep, so
/// doctor always completes and exits 0.
pub async fn run_doctor(
    runner: &impl CommandRunner,
    probe: &impl PlatformProbe,
    agent_socket: bool,
    reporter: &impl ProgressReporter,
) -> DoctorChecks {
    reporter.step("detecting platform...");
    let platform = platform::classify(
        &probe.kernel_version().unwrap_or_default(),
        probe.device_model().as_deref(),
    );

    reporter.step("checking required tools...");
    let mut tools = Vec::with_capacity(REQUIRED_TOOLS.len());
    for &(name, args) in REQUIRED_TOOLS {
        tools.push(probe_tool(runner, name, args).await);
    }

    reporter.step("checking clipboard tools...");
    let mut clipboard = None;
    for &(name, args) in CLIPBOARD_PROBES {
        // Empty stdin so tools that read it (clip.exe) return immediately.
        if runner.run_with_stdin(name, args, b"").await.is_ok() {
            clipboard = Some(name.to_string());
            break;
        }
    }

    reporter.success("diagnostics complete");
    DoctorChecks {
        platform,
        tools,
        agent_socket,
        clipboard,
    }
}

/// A tool counts as found if it could be spawned at all — usage errors
/// (exit 1 from `ssh-keygen -?`) still prove the binary is on PATH.
async fn probe_tool(runner: &impl CommandRunner, name: &str, args: &[&str]) -> ToolCheck {
    match runner.run(name, args).await {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let version = stdout
                .lines()
                .next()
                .filter(|l| l.to_ascii_lowercase().contains("version"))
                .and_then(|l| l.split_whitespace().last())
                .map(str::to_owned);
            ToolCheck {
                name: name.to_string(),
                found: true,
                version,
            }
        }
        Err(_) => ToolCheck {
            name: name.to_string(),
            found: false,
            version: None,
        },
    }
}
