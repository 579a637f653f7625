//! Common types used across the platform

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// GPS coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Inclusive date range
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Number of calendar days covered, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
