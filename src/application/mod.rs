//! Application layer — ports and services.

pub mod ports;
pub mod services;
