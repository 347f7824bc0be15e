//! Platform probe backed by `/proc`.

use std::path::Path;

use crate::application::ports::PlatformProbe;

/// Reads the real `/proc/version` and `/proc/device-tree/model`.
pub struct ProcPlatformProbe;

impl PlatformProbe for ProcPlatformProbe {
    fn kernel_version(&self) -> Option<String> {
        read_trimmed(Path::new("/proc/version"))
    }

    fn device_model(&self) -> Option<String> {
        read_trimmed(Path::new("/proc/device-tree/model"))
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    let raw = std::fs::read_to_string(path).ok()?;
    // The device-tree model is NUL-terminated.
    let value = raw.trim_matches(['\0', '\n', ' ']).to_string();
    (!value.is_empty()).then_some(value)
}
