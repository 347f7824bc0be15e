//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator at the application boundary.

use thiserror::Error;

// ── Registry errors ───────────────────────────────────────────────────────────

/// Fatal errors raised by the host credential registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("alias must not be empty")]
    EmptyAlias,

    #[error("key generation failed for {path}: {detail}")]
    KeygenFailed { path: String, detail: String },
}

// ── Prompt errors ─────────────────────────────────────────────────────────────

/// Errors raised when a required value cannot be obtained.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("missing value for <{0}> and interactive prompts are disabled; pass it as an argument")]
    NonInteractive(String),
}
