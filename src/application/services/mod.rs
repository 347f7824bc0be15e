//! Application services — use-cases over the port traits.

pub mod doctor;
pub mod registry;
pub mod setup;
