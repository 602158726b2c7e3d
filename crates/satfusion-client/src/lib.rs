//! SatFusion Client - HTTP adapter for the analysis service
//!
//! Implements the `AnalysisService` port over HTTP and exposes the
//! service's auxiliary endpoints (health, catalog, scene query, merge).

pub mod client;

pub use client::{extract_detail, HttpAnalysisClient};
