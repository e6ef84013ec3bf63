//! Where to look in the sky: bearing, elevation and distance from an observer
//! on the ground to an aircraft, and the one-line summary built from them.
//!
//! Angles enter in degrees and are converted to radians immediately; all the
//! work is done in radians. Terminology:
//! - azimuth: angle from North, clockwise (North = 0, East = π/2)
//! - elevation: angle above the horizon (horizon = 0, zenith = π/2)
//! - slant distance: straight line between the observer and the aircraft
//!
//! Bearing and distance formulas follow
//! <http://www.movable-type.co.uk/scripts/latlong.html>.

use nalgebra::Vector2;
use std::f64::consts::{PI, TAU};

use crate::compass::interpret_azimuth;
use crate::error::SightingError;
use crate::observer::Observer;
use crate::target::Target;

/// Mean Earth radius (meters)
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Aircraft computed below 3° are reported as below the horizon. The
/// flat-ground model overestimates elevation, and the true horizon sits lower
/// once Earth's curvature is taken into account.
pub const HORIZON_MARGIN: f64 = PI / 60.0;

/// Contrails need air colder than about -39°C, which is rarely found below
/// ~30,000 ft (9144 m). An aircraft lower than this leaves no trails.
pub const CONTRAIL_MIN_ALTITUDE: f64 = 9_144.0;

pub const BELOW_HORIZON: &str = "Below the horizon";
pub const NO_TRAILS: &str = "No trails";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,  // degrees
    pub longitude: f64, // degrees
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SightingResult {
    pub ground_distance: f64, // meters
    pub elevation: f64,       // radians
    pub slant_distance: f64,  // meters
    pub azimuth: f64,         // radians, within [0, 2π)
    pub below_horizon: bool,
    pub no_trails: bool,
}

impl SightingResult {
    pub fn azimuth_degrees(&self) -> f64 {
        self.azimuth.to_degrees()
    }

    pub fn elevation_degrees(&self) -> f64 {
        self.elevation.to_degrees()
    }

    pub fn slant_distance_km(&self) -> f64 {
        self.slant_distance / 1000.0
    }

    pub fn ground_distance_km(&self) -> f64 {
        self.ground_distance / 1000.0
    }

    pub fn compass_point(&self) -> &'static str {
        interpret_azimuth(self.azimuth)
    }
}

/// Compute where an aircraft at `altitude` meters above `target` appears
/// from `observer`.
///
/// Ground distance uses an equirectangular approximation and the ground
/// between observer and aircraft is treated as flat, so elevation and slant
/// distance come from a right triangle. NaN inputs poison every field.
pub fn compute_sighting(observer: Coordinate, target: Coordinate, altitude: f64) -> SightingResult {
    let lat1 = observer.latitude.to_radians();
    let lon1 = observer.longitude.to_radians();
    let lat2 = target.latitude.to_radians();
    let lon2 = target.longitude.to_radians();

    let ground_distance = ground_distance_between(lat1, lon1, lat2, lon2);
    let elevation = elevation_angle(ground_distance, altitude);

    SightingResult {
        ground_distance,
        elevation,
        slant_distance: Vector2::new(ground_distance, altitude).norm(),
        azimuth: azimuth_between(lat1, lon1, lat2, lon2),
        below_horizon: elevation < HORIZON_MARGIN,
        no_trails: altitude < CONTRAIL_MIN_ALTITUDE,
    }
}

/// Render a sighting as e.g. `"ENE 22° 25km, No trails"`.
pub fn format_sighting(result: &SightingResult) -> String {
    if result.below_horizon {
        return BELOW_HORIZON.to_string();
    }

    let mut line = format!(
        "{} {}° {}km",
        result.compass_point(),
        result.elevation_degrees().round(),
        result.slant_distance_km().round()
    );
    if result.no_trails {
        line.push_str(", ");
        line.push_str(NO_TRAILS);
    }
    line
}

/// Compute the sighting once the observer and the telemetry are both usable.
pub fn sight(observer: &Observer, target: &Target) -> Result<SightingResult, SightingError> {
    let position = observer.position()?;
    if !target.is_complete() {
        return Err(SightingError::AwaitingTelemetry);
    }
    Ok(compute_sighting(position, target.position, target.altitude))
}

/// The SpotThePlane line: the formatted sighting, or the reason there is none.
pub fn status_line(observer: &Observer, target: &Target) -> String {
    match sight(observer, target) {
        Ok(result) => format_sighting(&result),
        Err(e) => e.to_string(),
    }
}

/// Bearing of 2 as seen from 1.
fn azimuth_between(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let y = (lon2 - lon1).sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * (lon2 - lon1).cos();
    (y.atan2(x) + TAU) % TAU
}

fn ground_distance_between(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = lat2 - lat1;
    let d_lon = (lon2 - lon1) * ((lat1 + lat2) / 2.0).cos();
    Vector2::new(d_lat, d_lon).norm() * EARTH_RADIUS
}

// Directly overhead at zero altitude has no defined angle; treat it as on the horizon.
fn elevation_angle(ground_distance: f64, altitude: f64) -> f64 {
    if ground_distance == 0.0 && altitude == 0.0 {
        0.0
    } else {
        (altitude / ground_distance).atan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::f64::consts::FRAC_PI_2;

    const GREENWICH: Coordinate = Coordinate {
        latitude: 51.4769,
        longitude: 0.0,
    };

    fn east_of_greenwich(degrees: f64) -> Coordinate {
        Coordinate::new(GREENWICH.latitude, degrees)
    }

    #[test]
    fn test_greenwich_example() {
        let result = compute_sighting(GREENWICH, east_of_greenwich(1.0), 10_000.0);

        assert!((result.ground_distance_km() - 69.25).abs() < 0.05);
        assert!((result.elevation_degrees() - 8.22).abs() < 0.01);
        assert!((result.slant_distance_km() - 69.97).abs() < 0.05);
        assert!((result.azimuth_degrees() - 89.6).abs() < 0.1);
        assert!(!result.below_horizon);
        assert!(!result.no_trails);
        assert_eq!(format_sighting(&result), "E 8° 70km");
    }

    #[test]
    fn test_same_position_on_the_ground_is_below_horizon() {
        let result = compute_sighting(GREENWICH, GREENWICH, 0.0);

        assert_eq!(result.ground_distance, 0.0);
        assert_eq!(result.elevation, 0.0);
        assert_eq!(result.slant_distance, 0.0);
        assert!(result.below_horizon);
        assert_eq!(format_sighting(&result), BELOW_HORIZON);
    }

    #[test]
    fn test_directly_overhead() {
        let result = compute_sighting(GREENWICH, GREENWICH, 1_000.0);

        assert_eq!(result.elevation, FRAC_PI_2);
        assert_eq!(result.slant_distance, 1_000.0);
        assert_eq!(format_sighting(&result), "N 90° 1km, No trails");
    }

    #[rstest]
    #[case(3_000.0)]
    #[case(500.0)]
    #[case(0.0)]
    fn test_low_aircraft_far_away_is_below_horizon(#[case] altitude: f64) {
        let result = compute_sighting(GREENWICH, east_of_greenwich(1.0), altitude);

        assert!(result.elevation < HORIZON_MARGIN);
        assert_eq!(format_sighting(&result), "Below the horizon");
    }

    #[test]
    fn test_horizon_threshold_is_three_degrees() {
        let ground = compute_sighting(GREENWICH, east_of_greenwich(1.0), 0.0).ground_distance;
        let at_margin = ground * (3.0f64.to_radians()).tan();

        assert!(compute_sighting(GREENWICH, east_of_greenwich(1.0), at_margin * 0.999).below_horizon);
        assert!(!compute_sighting(GREENWICH, east_of_greenwich(1.0), at_margin * 1.001).below_horizon);
    }

    #[test]
    fn test_contrail_threshold() {
        let low = compute_sighting(GREENWICH, east_of_greenwich(0.1), 9_143.0);
        let high = compute_sighting(GREENWICH, east_of_greenwich(0.1), 9_144.0);

        assert!(low.no_trails);
        assert!(format_sighting(&low).ends_with(", No trails"));
        assert!(!high.no_trails);
        assert!(!format_sighting(&high).contains(NO_TRAILS));
    }

    #[rstest]
    #[case(Coordinate::new(52.4769, 0.0), "N")]
    #[case(Coordinate::new(50.4769, 0.0), "S")]
    #[case(Coordinate::new(51.4769, -1.0), "W")]
    #[case(Coordinate::new(52.0, 0.8), "NE")]
    #[case(Coordinate::new(51.0, -0.8), "SW")]
    fn test_compass_direction(#[case] target: Coordinate, #[case] expected: &str) {
        let result = compute_sighting(GREENWICH, target, 30_000.0);
        assert_eq!(result.compass_point(), expected);
    }

    #[test]
    fn test_azimuth_is_normalized() {
        let coordinates = [-89.0, -45.5, -10.0, -0.001, 0.0, 0.001, 10.0, 45.5, 89.0];
        let longitudes = [-179.0, -90.0, -0.5, 0.0, 0.5, 90.0, 179.0];
        for lat1 in coordinates {
            for lat2 in coordinates {
                for lon2 in longitudes {
                    let result =
                        compute_sighting(Coordinate::new(lat1, 0.0), Coordinate::new(lat2, lon2), 0.0);
                    assert!(
                        (0.0..TAU).contains(&result.azimuth),
                        "azimuth {} out of range for ({lat1}, 0) -> ({lat2}, {lon2})",
                        result.azimuth
                    );
                }
            }
        }
    }

    #[test]
    fn test_nan_propagates() {
        let result = compute_sighting(Coordinate::new(f64::NAN, 0.0), GREENWICH, 10_000.0);

        assert!(result.ground_distance.is_nan());
        assert!(result.elevation.is_nan());
        assert!(result.slant_distance.is_nan());
        assert!(result.azimuth.is_nan());
        assert!(!result.below_horizon);
    }

    #[test]
    fn test_status_line() {
        let target = Target::from_text("51.4769", "1", "32,808 ft");
        let mut observer = Observer::new("Greenwich".to_string(), None, None);
        assert_eq!(status_line(&observer, &target), "Awaiting coordinates");

        observer.set_latitude_text("51.4769");
        observer.set_longitude_text("zero");
        assert_eq!(status_line(&observer, &target), "Invalid coordinates");

        observer.set_longitude_text("0");
        assert_eq!(status_line(&observer, &target), "E 8° 70km");

        let grounded = Target::from_text("51.4769", "1", "");
        assert_eq!(status_line(&observer, &grounded), "Awaiting aircraft data");
    }
}
