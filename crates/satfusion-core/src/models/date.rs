//! Calendar dates in the analysis service's `DD-MM-YYYY` wire format.

use crate::error::{FusionError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const WIRE_FORMAT: &str = "%d-%m-%Y";
const ISO_FORMAT: &str = "%Y-%m-%d";

/// A calendar date serialized as zero-padded `DD-MM-YYYY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct WireDate(NaiveDate);

impl WireDate {
    /// Parse the wire form, e.g. `31-01-2024`
    pub fn parse(value: &str) -> Result<Self> {
        parse_with(value, WIRE_FORMAT, "expected DD-MM-YYYY")
    }

    /// Parse an ISO date as produced by date pickers, e.g. `2024-01-31`
    pub fn parse_iso(value: &str) -> Result<Self> {
        parse_with(value, ISO_FORMAT, "expected YYYY-MM-DD")
    }

    /// Parse either the wire form or ISO form
    pub fn parse_any(value: &str) -> Result<Self> {
        Self::parse(value).or_else(|_| Self::parse_iso(value))
    }
}

fn parse_with(value: &str, format: &str, hint: &str) -> Result<WireDate> {
    // chrono accepts unpadded fields; the wire format is fixed width
    if value.len() != 10 {
        return Err(FusionError::InvalidDate {
            value: value.to_string(),
            reason: hint.to_string(),
        });
    }
    NaiveDate::parse_from_str(value, format).map(WireDate).map_err(|e| {
        FusionError::InvalidDate {
            value: value.to_string(),
            reason: format!("{}: {}", hint, e),
        }
    })
}

impl fmt::Display for WireDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl FromStr for WireDate {
    type Err = FusionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_any(s)
    }
}

impl From<WireDate> for String {
    fn from(date: WireDate) -> Self {
        date.to_string()
    }
}

impl TryFrom<String> for WireDate {
    type Error = FusionError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

/// Acquisition window for an analysis.
///
/// `start <= end` is not enforced; see [`DateRange::is_chronological`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: WireDate,
    pub end: WireDate,
}

impl DateRange {
    pub fn new(start: WireDate, end: WireDate) -> Self {
        Self { start, end }
    }

    pub fn is_chronological(&self) -> bool {
        self.start <= self.end
    }
}

impl Default for DateRange {
    /// January 2024
    fn default() -> Self {
        Self {
            start: WireDate(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()),
            end: WireDate(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap_or_default()),
        }
    }
}
