//! Lumen API Library
//!
//! This crate provides the HTTP handlers and application setup for the
//! image-processing API.

mod api_doc;
mod handlers;

pub mod error;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::ErrorResponse;
