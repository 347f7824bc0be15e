//! Timestamped run log for setup steps.
//!
//! Each `rigup setup` invocation appends to its own
//! `rigup-YYYYmmdd-HHMMSS.log` so past runs stay inspectable.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

/// Append-only log file for one provisioning run.
pub struct RunLog {
    path: PathBuf,
    file: std::fs::File,
}

impl RunLog {
    /// Create a new run log under `dir`, creating the directory as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created.
    pub fn create_in(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
        let path = dir.join(format!("rigup-{}.log", Local::now().format("%Y%m%d-%H%M%S")));
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        Ok(Self { path, file })
    }

    /// Default log directory: `RIGUP_LOG_DIR`, else the XDG state dir,
    /// else `~/.local/state`, suffixed with `rigup/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_dir() -> Result<PathBuf> {
        if let Ok(val) = std::env::var("RIGUP_LOG_DIR") {
            return Ok(PathBuf::from(val));
        }
        let base = dirs::state_dir().map_or_else(
            || {
                dirs::home_dir()
                    .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))
                    .map(|h| h.join(".local").join("state"))
            },
            Ok,
        )?;
        Ok(base.join("rigup"))
    }

    /// Append one timestamped line. Write failures are swallowed — a
    /// broken log must never abort a provisioning step.
    pub fn record(&mut self, message: &str) {
        let _ = writeln!(self.file, "[{}] {message}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    }

    /// Path of this run's log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_run_log_creates_directory_and_records_lines() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let log_dir = dir.path().join("state").join("rigup");
        let mut log = RunLog::create_in(&log_dir).expect("create");
        log.record("platform: generic Linux");
        log.record("git identity: ok");

        let content = std::fs::read_to_string(log.path()).expect("read");
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("platform: generic Linux"));
        assert!(content.lines().all(|l| l.starts_with('[')));
    }

    #[test]
    fn test_run_log_filename_is_timestamped() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let log = RunLog::create_in(dir.path()).expect("create");
        let name = log.path().file_name().expect("name").to_string_lossy().into_owned();
        assert!(name.starts_with("rigup-"));
        assert!(name.ends_with(".log"));
    }
}
