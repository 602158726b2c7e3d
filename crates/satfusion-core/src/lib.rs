//! SatFusion Core - Domain models, error taxonomy, and configuration
//!
//! This crate contains the data model shared by the selector, the panel
//! orchestrator and the HTTP adapter, plus the port the orchestrator
//! dispatches through.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{FusionError, RemoteError, Result, ValidationError};
