use std::f64::consts::TAU;

/// 16-point compass, clockwise from North. Each point covers a 22.5° sector.
pub const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Return the compass point closest to an azimuth given in radians, within [0, 2π).
///
/// Canonical angles `k * 2π/16` are scanned upward from k = 1. Distances to
/// evenly spaced points only shrink until the optimum is passed, so the scan
/// stops at the first non-improving step. k is allowed to reach 16 so that
/// something like 358° resolves to North.
pub fn interpret_azimuth(azimuth: f64) -> &'static str {
    let len = COMPASS.len();
    let step = TAU / len as f64;

    let mut closest = COMPASS[0];
    let mut min = azimuth;
    for k in 1..=len {
        let dist = (azimuth - k as f64 * step).abs();
        if dist < min {
            min = dist;
            closest = COMPASS[k % len];
        } else {
            break;
        }
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[rstest]
    #[case(0.0, "N")]
    #[case(FRAC_PI_2, "E")]
    #[case(PI, "S")]
    #[case(3.0 * FRAC_PI_2, "W")]
    #[case(TAU - 1e-9, "N")]
    #[case(358f64.to_radians(), "N")]
    #[case(11.0f64.to_radians(), "N")]
    #[case(12.0f64.to_radians(), "NNE")]
    #[case(67.5f64.to_radians(), "ENE")]
    #[case(200.0f64.to_radians(), "SSW")]
    #[case(340.0f64.to_radians(), "NNW")]
    fn classifies_nearest_compass_point(#[case] azimuth: f64, #[case] expected: &str) {
        assert_eq!(interpret_azimuth(azimuth), expected);
    }

    #[test]
    fn early_stop_matches_full_argmin() {
        let step = TAU / 16.0;
        for i in 0..6283 {
            let azimuth = i as f64 * 0.001;
            let best = (0..=16)
                .min_by(|a, b| {
                    let da = (azimuth - *a as f64 * step).abs();
                    let db = (azimuth - *b as f64 * step).abs();
                    da.total_cmp(&db)
                })
                .unwrap();
            assert_eq!(interpret_azimuth(azimuth), COMPASS[best % 16], "azimuth {azimuth}");
        }
    }

    #[test]
    fn nan_azimuth_falls_back_to_north() {
        assert_eq!(interpret_azimuth(f64::NAN), "N");
    }
}
