//! Validation utilities for station metadata and request inputs

use crate::models::StationInfo;

// ============================================================================
// Geophysical Validations
// ============================================================================

/// Validate latitude is strictly inside (-90, 90) degrees
pub fn validate_latitude(latitude: f64) -> Result<(), &'static str> {
    if !latitude.is_finite() || latitude.abs() >= 90.0 {
        return Err("Latitude must be between -90 and 90 degrees (exclusive)");
    }
    Ok(())
}

/// Validate longitude is within [-180, 180] degrees
pub fn validate_longitude(longitude: f64) -> Result<(), &'static str> {
    if !longitude.is_finite() || longitude.abs() > 180.0 {
        return Err("Longitude must be between -180 and 180 degrees");
    }
    Ok(())
}

/// Validate altitude in meters (Dead Sea shore to high plateaus)
pub fn validate_altitude(altitude: f64) -> Result<(), &'static str> {
    if !altitude.is_finite() || !(-500.0..=9000.0).contains(&altitude) {
        return Err("Altitude must be between -500 and 9000 meters");
    }
    Ok(())
}

/// Validate ordinal day of year
pub fn validate_day_of_year(day_of_year: u32) -> Result<(), &'static str> {
    if !(1..=366).contains(&day_of_year) {
        return Err("Day of year must be between 1 and 366");
    }
    Ok(())
}

/// Validate timezone offset in whole hours east of UTC
pub fn validate_timezone_offset(hours: i32) -> Result<(), &'static str> {
    if !(-12..=14).contains(&hours) {
        return Err("Timezone offset must be between -12 and +14 hours");
    }
    Ok(())
}

// ============================================================================
// Identifier Validations
// ============================================================================

/// Validate station identifier (1-64 characters, alphanumeric, '-' or '_')
pub fn validate_station_id(id: &str) -> Result<(), &'static str> {
    if id.is_empty() {
        return Err("Station id must not be empty");
    }
    if id.len() > 64 {
        return Err("Station id must be at most 64 characters");
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("Station id may only contain letters, digits, '-' and '_'");
    }
    Ok(())
}

/// Validate every field of a station entry
pub fn validate_station_info(station: &StationInfo) -> Result<(), &'static str> {
    validate_station_id(&station.id)?;
    validate_latitude(station.latitude)?;
    validate_longitude(station.longitude)?;
    validate_altitude(station.altitude)?;
    validate_timezone_offset(station.timezone_offset_hours)?;
    if let Some(day) = station.day_of_year {
        validate_day_of_year(day)?;
    }
    Ok(())
}
