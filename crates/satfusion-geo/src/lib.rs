//! SatFusion Geo - Map selection and spatial helpers
//!
//! This crate turns map clicks into query geometries and computes the
//! spatial figures shown alongside a selection.

pub mod models;
pub mod selector;
pub mod spatial;

pub use selector::{GeometrySelector, SelectionMode, SelectorState};
