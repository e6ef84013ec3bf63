use crate::parsing::{parse_altitude, parse_coordinate};
use crate::sighting::Coordinate;

/// Telemetry of the selected aircraft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub position: Coordinate,
    pub altitude: f64, // meters
}

/// Telemetry as displayed by a flight tracker, kept verbatim so it can be edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetText {
    pub latitude: String,
    pub longitude: String,
    pub altitude: String, // e.g. "10,000 ft"
}

impl Target {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            position: Coordinate::new(latitude, longitude),
            altitude,
        }
    }

    /// Build a target from telemetry text. Malformed fields become NaN.
    pub fn from_text(latitude: &str, longitude: &str, altitude: &str) -> Self {
        Self::new(
            parse_coordinate(latitude.trim()),
            parse_coordinate(longitude.trim()),
            parse_altitude(altitude.trim()),
        )
    }

    pub fn is_complete(&self) -> bool {
        !(self.position.latitude.is_nan()
            || self.position.longitude.is_nan()
            || self.altitude.is_nan())
    }

    pub fn altitude_ft(&self) -> f64 {
        self.altitude * crate::parsing::FEET_PER_METER
    }
}

impl TargetText {
    pub fn new(latitude: &str, longitude: &str, altitude: &str) -> Self {
        Self {
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
            altitude: altitude.to_string(),
        }
    }

    pub fn parse(&self) -> Target {
        Target::from_text(&self.latitude, &self.longitude, &self.altitude)
    }
}
