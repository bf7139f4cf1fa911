//! Core library for the candidate document collection service: lifecycle
//! rules, storage and notification seams, and the HTTP router.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

pub use error::AppError;
