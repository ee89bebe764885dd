//! Lumen Core Library
//!
//! This crate provides the configuration and error types shared across
//! all Lumen components.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
