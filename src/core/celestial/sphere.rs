//! Spherical geometry on the celestial sphere.

/// Great-circle distance in degrees between two (RA, Dec) positions given in degrees.
///
/// Haversine form, so small separations and the 0°/360° right-ascension
/// seam need no special casing.
pub fn angular_distance(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> f64 {
    let dec1 = dec1.to_radians();
    let dec2 = dec2.to_radians();
    let d_ra = ra2.to_radians() - ra1.to_radians();
    let d_dec = dec2 - dec1;

    let a = (d_dec / 2.0).sin().powi(2) + dec1.cos() * dec2.cos() * (d_ra / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1.0 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    c.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_same_point_is_zero() {
        assert!(angular_distance(123.4, -45.6, 123.4, -45.6).abs() < EPS);
    }

    #[test]
    fn test_quarter_turns() {
        assert!((angular_distance(0.0, 0.0, 90.0, 0.0) - 90.0).abs() < EPS);
        assert!((angular_distance(0.0, 0.0, 0.0, 90.0) - 90.0).abs() < EPS);
        assert!((angular_distance(0.0, -45.0, 0.0, 45.0) - 90.0).abs() < EPS);
    }

    #[test]
    fn test_wraps_across_zero_right_ascension() {
        let d = angular_distance(359.0, 0.0, 1.0, 0.0);
        assert!((d - 2.0).abs() < 1e-6, "got {}", d);
    }

    #[test]
    fn test_poles_ignore_right_ascension() {
        assert!(angular_distance(0.0, 90.0, 180.0, 90.0).abs() < 1e-6);
        assert!((angular_distance(10.0, 90.0, 250.0, -90.0) - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_antipodal_points() {
        let d = angular_distance(0.0, 0.0, 180.0, 0.0);
        assert!((d - 180.0).abs() < 1e-6);
        assert!(!d.is_nan());
    }

    #[test]
    fn test_sirius_to_betelgeuse() {
        let d = angular_distance(101.287, -16.716, 88.793, 7.407);
        assert!(d > 26.5 && d < 27.7, "got {}", d);
    }

    #[test]
    fn test_symmetric() {
        let ab = angular_distance(10.0, 20.0, 200.0, -30.0);
        let ba = angular_distance(200.0, -30.0, 10.0, 20.0);
        assert!((ab - ba).abs() < EPS);
    }
}
