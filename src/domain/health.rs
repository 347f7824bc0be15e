//! Doctor check types — data only, rendering lives in `commands::doctor`.

use serde::Serialize;

use crate::domain::platform::Platform;

/// All check categories returned by the doctor command.
#[derive(Debug, Serialize)]
pub struct DoctorChecks {
    /// Detected workstation platform.
    pub platform: Platform,
    /// Availability of the external tools rigup shells out to.
    pub tools: Vec<ToolCheck>,
    /// Whether `SSH_AUTH_SOCK` points at an agent session.
    pub agent_socket: bool,
    /// First clipboard tool found, if any.
    pub clipboard: Option<String>,
}

/// Availability of one external tool.
#[derive(Debug, Serialize)]
pub struct ToolCheck {
    /// Program name as invoked.
    pub name: String,
    /// Whether the program could be spawned.
    pub found: bool,
    /// Parsed version, when the tool reports one.
    pub version: Option<String>,
}

impl DoctorChecks {
    /// Human-readable issue list; empty means everything checked out.
    #[must_use]
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for tool in &self.tools {
            if !tool.found {
                issues.push(format!("{} not found on PATH", tool.name));
            }
        }
        if !self.agent_socket {
            issues.push("SSH_AUTH_SOCK is not set; keys cannot be loaded into an agent".to_string());
        }
        if self.clipboard.is_none() {
            issues.push("no clipboard tool found; public keys must be copied manually".to_string());
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(name: &str, found: bool) -> ToolCheck {
        ToolCheck {
            name: name.to_string(),
            found,
            version: None,
        }
    }

    #[test]
    fn test_issues_empty_when_everything_found() {
        let checks = DoctorChecks {
            platform: Platform::GenericLinux,
            tools: vec![tool("git", true), tool("ssh-keygen", true)],
            agent_socket: true,
            clipboard: Some("wl-copy".to_string()),
        };
        assert!(checks.issues().is_empty());
    }

    #[test]
    fn test_issues_reports_missing_tool_agent_and_clipboard() {
        let checks = DoctorChecks {
            platform: Platform::Wsl2,
            tools: vec![tool("git", true), tool("ssh-add", false)],
            agent_socket: false,
            clipboard: None,
        };
        let issues = checks.issues();
        assert_eq!(issues.len(), 3);
        assert!(issues[0].contains("ssh-add"));
        assert!(issues[1].contains("SSH_AUTH_SOCK"));
        assert!(issues[2].contains("clipboard"));
    }
}
