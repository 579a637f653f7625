//! Station metadata and the directory used to resolve station identifiers

use std::collections::HashMap;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// Identifier of the built-in reference station
pub const REFERENCE_STATION_ID: &str = "default";

/// Geophysical metadata of a weather station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level
    pub altitude: f64,
    /// Hours east of UTC
    #[serde(default)]
    pub timezone_offset_hours: i32,
    /// Fixed day-of-year used instead of the current date
    #[serde(default)]
    pub day_of_year: Option<u32>,
}

impl StationInfo {
    /// Reference station used when nothing else is configured
    /// (western Bahia plateau, UTC-3).
    pub fn reference() -> Self {
        Self {
            id: REFERENCE_STATION_ID.to_string(),
            name: "Estação de referência".to_string(),
            latitude: -12.15,
            longitude: -45.0,
            altitude: 400.0,
            timezone_offset_hours: -3,
            day_of_year: None,
        }
    }

    pub fn coordinates(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.latitude, self.longitude)
    }

    /// Station timezone. Out-of-range offsets fall back to UTC.
    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.timezone_offset_hours * 3600)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Calendar date at the station for the given instant
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.timezone()).date_naive()
    }

    /// Day-of-year for solar geometry: the override when set, else today's
    /// ordinal in the station timezone.
    pub fn day_of_year_at(&self, now: DateTime<Utc>) -> u32 {
        self.day_of_year
            .unwrap_or_else(|| self.local_date(now).ordinal())
    }

    /// Site context for an estimate on the given day
    pub fn site(&self, day_of_year: u32) -> SiteContext {
        SiteContext {
            latitude: self.latitude,
            altitude: self.altitude,
            day_of_year,
        }
    }
}

/// Location and date inputs required by the radiation model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteContext {
    pub latitude: f64,
    pub altitude: f64,
    pub day_of_year: u32,
}

/// Read-only lookup table of stations keyed by identifier
#[derive(Debug, Clone)]
pub struct StationDirectory {
    default_id: String,
    stations: HashMap<String, StationInfo>,
    fallback: StationInfo,
}

impl StationDirectory {
    pub fn new(default_id: impl Into<String>, entries: impl IntoIterator<Item = StationInfo>) -> Self {
        Self {
            default_id: default_id.into(),
            stations: entries
                .into_iter()
                .map(|station| (station.id.clone(), station))
                .collect(),
            fallback: StationInfo::reference(),
        }
    }

    /// Resolve a station, falling back to the default for unknown identifiers
    pub fn lookup(&self, id: &str) -> &StationInfo {
        self.stations
            .get(id)
            .unwrap_or_else(|| self.default_station())
    }

    /// The configured default station, or the reference station if the
    /// default identifier is not in the table.
    pub fn default_station(&self) -> &StationInfo {
        self.stations.get(&self.default_id).unwrap_or(&self.fallback)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.stations.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl Default for StationDirectory {
    fn default() -> Self {
        Self::new(REFERENCE_STATION_ID, [StationInfo::reference()])
    }
}
