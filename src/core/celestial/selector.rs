//! Constellation Selector
//!
//! Picks the stars of a day's constellation: every resolvable anchor of the
//! active gate, then a Lunar-Month-sized run of the brightest general stars.

use tracing::{debug, warn};

use crate::core::catalog::{CelestialPoint, StarCatalog, StarRecord};

/// Fewest secondary stars any constellation carries.
pub const MIN_SECONDARY_STARS: usize = 4;

/// Number of secondary stars for a Lunar Month: `4 + (L mod 5)`, in 4-8.
pub fn secondary_count(lunar_month: u8) -> usize {
    MIN_SECONDARY_STARS + (lunar_month as usize % 5)
}

/// Select the stars for a gate and Lunar Month, anchors first.
///
/// Anchors keep catalog order and are tagged `is_anchor`. Anchors with no
/// coordinates are left out. Secondaries are the first
/// [`secondary_count`] bright stars having both coordinates; a short
/// catalog yields fewer.
pub fn select_stars(catalog: &StarCatalog, gate_id: u8, lunar_month: u8) -> Vec<CelestialPoint> {
    let mut stars: Vec<CelestialPoint> = Vec::new();

    for (name, point) in catalog.anchors(gate_id) {
        match point {
            Some(point) => stars.push(point),
            None => {
                warn!(gate = gate_id, anchor = %name, "anchor has no coordinates, skipped")
            }
        }
    }
    let anchor_count = stars.len();

    let wanted = secondary_count(lunar_month);
    stars.extend(
        catalog
            .bright_stars()
            .iter()
            .filter_map(secondary_point)
            .take(wanted),
    );

    debug!(
        gate = gate_id,
        lunar_month,
        anchors = anchor_count,
        secondaries = stars.len() - anchor_count,
        wanted,
        "stars selected"
    );
    stars
}

/// A bright-star record as a secondary point, if it has a position.
fn secondary_point(record: &StarRecord) -> Option<CelestialPoint> {
    let (ra, dec) = record.position()?;
    let id = record.catalog_ref();
    Some(CelestialPoint {
        name: record.name.clone().unwrap_or_else(|| id.clone()),
        id,
        ra,
        dec,
        magnitude: record.magnitude,
        is_anchor: false,
    })
}
