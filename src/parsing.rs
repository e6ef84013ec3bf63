//! Text helpers for telemetry and observer coordinates as they are typed or
//! scraped: altitudes like `"10,000 ft"`, decimal degrees, and the compact
//! coordinate display used in the header.

/// 1 foot = 1/3.2808 meters
pub const FEET_PER_METER: f64 = 3.2808;

/// Parse an altitude string in feet (e.g. `"10,000 ft"`) and return meters.
///
/// Only the leading token before the first space is considered. Thousands
/// separators are stripped and the leading integer is parsed, so trailing
/// garbage after the digits is ignored. Returns NaN when there is no integer.
pub fn parse_altitude(altitude: &str) -> f64 {
    let leading = altitude.split(' ').next().unwrap_or_default().replace(',', "");
    match leading_integer(&leading) {
        Some(feet) => feet / FEET_PER_METER,
        None => f64::NAN,
    }
}

/// Parse a coordinate in decimal degrees.
///
/// The whole string must be an optional minus sign, digits and an optional
/// decimal fraction. Anything else, including the empty string, yields NaN.
pub fn parse_coordinate(text: &str) -> f64 {
    if is_decimal(text) {
        text.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// Render a coordinate limited to 4 characters, e.g. `1.23456789` -> `"1.23..."`.
pub fn reduce_coord(coordinate: f64) -> String {
    // -0.0 displays as "0"
    let coordinate = if coordinate == 0.0 { 0.0 } else { coordinate };
    let text = coordinate.to_string();
    if text.chars().count() > 4 {
        format!("{}...", text.chars().take(4).collect::<String>())
    } else {
        text
    }
}

fn leading_integer(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);
    let digits = unsigned.len()
        - unsigned
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .len();
    if digits == 0 {
        return None;
    }
    let end = text.len() - unsigned.len() + digits;
    text[..end].parse().ok()
}

fn is_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match unsigned.split_once('.') {
        Some((whole, fraction)) => all_digits(whole) && all_digits(fraction),
        None => all_digits(unsigned),
    }
}
