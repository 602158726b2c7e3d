//! Map-click selection state machine.
//!
//! In [`SelectionMode::Point`] every click commits a point. In
//! [`SelectionMode::Polygon`] the first click is buffered as a corner and the
//! second click commits the normalized bounding box spanned by both corners.
//! Changing the mode drops any buffered corner.

use satfusion_core::error::{FusionError, Result};
use satfusion_core::models::{Coordinate, Geometry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many clicks make a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// One click commits a point
    #[default]
    Point,
    /// Two clicks commit a bounding box
    Polygon,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Point => f.write_str("point"),
            SelectionMode::Polygon => f.write_str("polygon"),
        }
    }
}

impl FromStr for SelectionMode {
    type Err = FusionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "point" => Ok(SelectionMode::Point),
            "polygon" | "area" | "bbox" => Ok(SelectionMode::Polygon),
            _ => Err(FusionError::UnknownSelectionMode { name: s.to_string() }),
        }
    }
}

/// Internal selector state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SelectorState {
    #[default]
    Idle,
    /// First corner of a bounding box is buffered
    AwaitingSecondClick { first: Coordinate },
}

/// Turns a stream of clicks into committed geometries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometrySelector {
    mode: SelectionMode,
    state: SelectorState,
}

impl GeometrySelector {
    pub fn new(mode: SelectionMode) -> Self {
        Self { mode, state: SelectorState::Idle }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    /// Buffered first corner, if a box selection is in progress
    pub fn pending(&self) -> Option<Coordinate> {
        match self.state {
            SelectorState::Idle => None,
            SelectorState::AwaitingSecondClick { first } => Some(first),
        }
    }

    /// Feed a map click.
    ///
    /// Returns the committed geometry, or `None` when the click was buffered.
    /// Invalid coordinates are rejected without touching the state.
    pub fn click(&mut self, lat: f64, lng: f64) -> Result<Option<Geometry>> {
        let coord = Coordinate::new(lat, lng)?;

        let committed = match (self.mode, self.state) {
            (SelectionMode::Point, _) => Some(Geometry::Point(coord)),
            (SelectionMode::Polygon, SelectorState::Idle) => {
                self.state = SelectorState::AwaitingSecondClick { first: coord };
                None
            }
            (SelectionMode::Polygon, SelectorState::AwaitingSecondClick { first }) => {
                self.state = SelectorState::Idle;
                Some(Geometry::bounding_box(first, coord))
            }
        };

        Ok(committed)
    }

    /// Switch mode, abandoning any in-progress box
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        self.state = SelectorState::Idle;
    }
}
