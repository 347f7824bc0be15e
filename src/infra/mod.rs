//! Infrastructure layer — production implementations of the port traits.

pub mod command_runner;
pub mod platform;
pub mod run_log;

pub use command_runner::{DEFAULT_CMD_TIMEOUT, TokioCommandRunner};
pub use platform::ProcPlatformProbe;
pub use run_log::RunLog;
