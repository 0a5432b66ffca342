//! Line Generator
//!
//! Connects constellation stars with the prime-step pattern of the Lunar
//! Month: star `i` is paired with star `(i + step) mod n`, and the pair is
//! kept when its angular separation falls inside the visible band.

use serde::Serialize;
use tracing::debug;

use super::sphere::angular_distance;
use crate::core::catalog::CelestialPoint;
use crate::core::tables::prime_step;

/// Most lines a constellation may carry.
pub const MAX_LINES: usize = 18;

/// Shortest accepted line, in degrees (inclusive).
pub const MIN_LINE_DEGREES: f64 = 10.0;

/// Longest accepted line, in degrees (inclusive).
pub const MAX_LINE_DEGREES: f64 = 120.0;

/// A line between two stars, by point id. Serializes as `[a, b]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Connection(pub String, pub String);

impl Connection {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self(a.into(), b.into())
    }
}

/// Whether two points are far enough apart to draw, and close enough to read.
pub fn is_valid_connection(a: &CelestialPoint, b: &CelestialPoint) -> bool {
    let distance = angular_distance(a.ra, a.dec, b.ra, b.dec);
    (MIN_LINE_DEGREES..=MAX_LINE_DEGREES).contains(&distance)
}

/// Generate the lines for a Lunar Month (1-13).
///
/// An unknown Lunar Month has no prime step and draws nothing.
pub fn generate_lines(points: &[CelestialPoint], lunar_month: u8) -> Vec<Connection> {
    match prime_step(lunar_month) {
        Some(step) => connect_with_step(points, step),
        None => {
            debug!(lunar_month, "no prime step for lunar month");
            Vec::new()
        }
    }
}

/// Pair each point with the one `step` positions ahead, keep valid pairs.
///
/// Pairs come out in source-index order and are not de-duplicated, so both
/// `(a, b)` and `(b, a)` may appear. Output stops at [`MAX_LINES`].
pub fn connect_with_step(points: &[CelestialPoint], step: usize) -> Vec<Connection> {
    if points.len() < 2 {
        return Vec::new();
    }

    let n = points.len();
    let mut rejected = 0usize;
    let lines: Vec<Connection> = (0..n)
        .filter_map(|i| {
            let a = &points[i];
            let b = &points[(i + step) % n];
            if is_valid_connection(a, b) {
                Some(Connection::new(a.id.clone(), b.id.clone()))
            } else {
                rejected += 1;
                None
            }
        })
        .take(MAX_LINES)
        .collect();

    debug!(points = n, step, accepted = lines.len(), rejected, "lines generated");
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: &str, ra: f64, dec: f64) -> CelestialPoint {
        CelestialPoint {
            id: id.to_string(),
            name: id.to_string(),
            ra,
            dec,
            magnitude: None,
            is_anchor: false,
        }
    }

    fn equator(count: usize, spacing: f64) -> Vec<CelestialPoint> {
        (0..count)
            .map(|i| point(&format!("p{}", i), i as f64 * spacing, 0.0))
            .collect()
    }

    #[test]
    fn test_fewer_than_two_points() {
        assert!(connect_with_step(&[], 2).is_empty());
        assert!(connect_with_step(&[point("a", 0.0, 0.0)], 2).is_empty());
        assert!(generate_lines(&[point("a", 0.0, 0.0)], 1).is_empty());
    }

    #[test]
    fn test_both_directions_kept() {
        let points = equator(4, 30.0);
        let lines = connect_with_step(&points, 2);
        assert_eq!(
            lines,
            vec![
                Connection::new("p0", "p2"),
                Connection::new("p1", "p3"),
                Connection::new("p2", "p0"),
                Connection::new("p3", "p1"),
            ]
        );
    }

    #[test]
    fn test_band_filter() {
        let points = vec![point("a", 0.0, 0.0), point("b", 5.0, 0.0), point("c", 50.0, 0.0)];
        // step 2: a→c (50°), b→a (5°, too short), c→b (45°)
        let lines = connect_with_step(&points, 2);
        assert_eq!(lines, vec![Connection::new("a", "c"), Connection::new("c", "b")]);
    }

    #[test]
    fn test_too_long_rejected() {
        let points = vec![point("a", 0.0, 0.0), point("b", 150.0, 0.0)];
        assert!(connect_with_step(&points, 3).is_empty());
    }

    #[test]
    fn test_band_edges() {
        let origin = point("o", 0.0, 0.0);
        assert!(is_valid_connection(&origin, &point("x", 10.5, 0.0)));
        assert!(is_valid_connection(&origin, &point("x", 119.5, 0.0)));
        assert!(!is_valid_connection(&origin, &point("x", 9.5, 0.0)));
        assert!(!is_valid_connection(&origin, &point("x", 120.5, 0.0)));
    }

    #[test]
    fn test_band_is_closed_at_both_ends() {
        let origin = point("o", 0.0, 0.0);
        // Exactly 10° along each axis
        assert!(is_valid_connection(&origin, &point("x", 10.0, 0.0)));
        assert!(is_valid_connection(&origin, &point("x", 0.0, 10.0)));
        // 120° along the equator
        assert!(is_valid_connection(&origin, &point("x", 120.0, 0.0)));
        assert!(is_valid_connection(&point("x", 120.0, 0.0), &origin));

        assert!(!is_valid_connection(&origin, &point("x", 9.999, 0.0)));
        assert!(!is_valid_connection(&origin, &point("x", 120.001, 0.0)));
    }

    #[test]
    fn test_capped_at_max_lines() {
        let points = equator(30, 12.0);
        let lines = connect_with_step(&points, 2);
        assert_eq!(lines.len(), MAX_LINES);
        assert_eq!(lines[0], Connection::new("p0", "p2"));
        assert_eq!(lines[17], Connection::new("p17", "p19"));
    }

    #[test]
    fn test_lunar_month_selects_prime_step() {
        let points = equator(10, 20.0);
        // L=3 → step 5: every pair is 100° apart
        let lines = generate_lines(&points, 3);
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], Connection::new("p0", "p5"));
        assert_eq!(lines[7], Connection::new("p7", "p2"));
    }

    #[test]
    fn test_unknown_lunar_month_draws_nothing() {
        let points = equator(10, 20.0);
        assert!(generate_lines(&points, 0).is_empty());
        assert!(generate_lines(&points, 14).is_empty());
    }

    #[test]
    fn test_connection_serializes_as_pair() {
        let json = serde_json::to_string(&Connection::new("Vega", "HR7557")).unwrap();
        assert_eq!(json, r#"["Vega","HR7557"]"#);
    }
}
