//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config_doc;
pub mod error;
pub mod health;
pub mod platform;

pub use config_doc::{ConfigDocument, HostEntry, Stanza};
pub use error::{PromptError, RegistryError};
pub use health::{DoctorChecks, ToolCheck};
pub use platform::{Platform, classify};
