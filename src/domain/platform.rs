//! Platform classification from kernel/device probe strings.
//!
//! Pure functions only — the strings come in through the `PlatformProbe`
//! port so tests never touch `/proc`.

use serde::Serialize;

/// The workstation flavors rigup knows how to provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// Windows Subsystem for Linux 2.
    Wsl2,
    /// Raspberry Pi (any model).
    RaspberryPi,
    /// Any other Linux.
    GenericLinux,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wsl2 => write!(f, "WSL2"),
            Self::RaspberryPi => write!(f, "Raspberry Pi"),
            Self::GenericLinux => write!(f, "generic Linux"),
        }
    }
}

/// Classify the platform from the kernel version string (`/proc/version`)
/// and the device-tree model (`/proc/device-tree/model`), when present.
#[must_use]
pub fn classify(kernel_version: &str, device_model: Option<&str>) -> Platform {
    let version = kernel_version.to_ascii_lowercase();
    if version.contains("microsoft") || version.contains("wsl") {
        return Platform::Wsl2;
    }
    if device_model.is_some_and(|m| m.to_ascii_lowercase().contains("raspberry pi")) {
        return Platform::RaspberryPi;
    }
    Platform::GenericLinux
}
