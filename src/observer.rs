use crate::error::SightingError;
use crate::parsing::{parse_coordinate, reduce_coord};
use crate::sighting::Coordinate;

/// Placeholder shown for a coordinate that was never entered.
pub const UNSET_LABEL: &str = "...";

#[derive(Debug, Clone, PartialEq)]
pub struct Observer {
    pub name: String,
    pub latitude: Option<f64>,  // degrees, None until entered, NaN when malformed
    pub longitude: Option<f64>, // degrees
}

impl Observer {
    pub fn new(name: String, lat: Option<f64>, lon: Option<f64>) -> Self {
        Self {
            name,
            latitude: lat,
            longitude: lon,
        }
    }

    /// Observer position in degrees, once both coordinates hold valid numbers.
    pub fn position(&self) -> Result<Coordinate, SightingError> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_nan() || lon.is_nan() => {
                Err(SightingError::InvalidCoordinates)
            }
            (Some(lat), Some(lon)) => Ok(Coordinate::new(lat, lon)),
            _ => Err(SightingError::AwaitingCoordinates),
        }
    }

    pub fn set_latitude_text(&mut self, text: &str) {
        self.latitude = coordinate_from_entry(text);
    }

    pub fn set_longitude_text(&mut self, text: &str) {
        self.longitude = coordinate_from_entry(text);
    }

    /// Compact `"<lat> | <lon>"` label for headers.
    pub fn location_label(&self) -> String {
        format!(
            "{} | {}",
            coordinate_label(self.latitude),
            coordinate_label(self.longitude)
        )
    }
}

/// Interpret typed or stored text: empty means unset, anything else is parsed
/// strictly and becomes NaN when malformed.
pub fn coordinate_from_entry(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(parse_coordinate(text))
    }
}

/// Inverse of [`coordinate_from_entry`], used to prefill an edit buffer.
pub fn coordinate_to_entry(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn coordinate_label(value: Option<f64>) -> String {
    match value {
        Some(v) => reduce_coord(v),
        None => UNSET_LABEL.to_string(),
    }
}
