//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

pub mod analysis;

pub use analysis::AnalysisService;
