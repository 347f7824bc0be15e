//! Command implementations

pub mod doctor;
pub mod registry;
pub mod setup;
pub mod version;
