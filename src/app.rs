//! Application context — unified state passed to every command handler.

use anyhow::Result;

use crate::domain::error::PromptError;
use crate::infra::TokioCommandRunner;
use crate::output::OutputContext;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Unified application context passed to every command handler.
///
/// Constructed once in `Cli::run()` and passed as `&AppContext` to all
/// command handlers.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Process runner shared by all commands.
    pub runner: TokioCommandRunner,
    /// When `true`, skip interactive prompts.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `RIGUP_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool, json: bool, yes: bool) -> Self {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("RIGUP_YES").is_ok();
        let mode = if json { OutputMode::Json } else { OutputMode::Human };
        Self {
            output: OutputContext::new(no_color, quiet),
            mode,
            runner: TokioCommandRunner::default(),
            non_interactive: yes || ci_env,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Return `value` if present, otherwise ask the operator for it.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::NonInteractive`] when the value is missing and
    /// prompts are disabled, or an error if the terminal prompt fails.
    pub fn require(&self, field: &str, value: Option<String>) -> Result<String> {
        if let Some(v) = value {
            return Ok(v);
        }
        if self.non_interactive {
            return Err(PromptError::NonInteractive(field.to_string()).into());
        }
        let answer: String = dialoguer::Input::new().with_prompt(field).interact_text()?;
        Ok(answer)
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true`, returns `default` immediately
    /// without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
