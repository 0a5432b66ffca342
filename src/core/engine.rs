//! Atlas Engine
//!
//! Runs the full pipeline for a date:
//!
//! ```text
//! date → SkyAddress → select_stars → generate_lines → assemble → AtlasPayload
//! ```
//!
//! The engine holds only the anchor date and a shared, immutable catalog, so
//! clones are cheap and one engine can serve any number of threads.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::core::catalog::{CatalogSource, CelestialPoint, StarCatalog};
use crate::core::celestial::{generate_lines, select_stars};
use crate::core::config::AtlasConfig;
use crate::core::error::{Result, ResultExt};
use crate::core::payload::{
    self, assemble, AtlasPayload, GateListing, LunarPatternListing, SkyAddressConversion,
    SolarKeyListing,
};
use crate::core::sky_address::{parse_date, SkyAddress};

/// Stateless facade over the atlas pipeline.
#[derive(Debug, Clone)]
pub struct AtlasEngine {
    anchor_date: NaiveDate,
    catalog: Arc<StarCatalog>,
}

impl AtlasEngine {
    /// Build an engine from configuration, loading its catalog.
    pub fn new(config: &AtlasConfig) -> Result<Self> {
        let source = config.catalog_source();
        Self::from_source(config.anchor_date, source.as_ref())
    }

    /// Build an engine from any catalog source. Fails if the source does.
    pub fn from_source(anchor_date: NaiveDate, source: &dyn CatalogSource) -> Result<Self> {
        let description = source.describe();
        let catalog = source
            .load()
            .context(format!("loading catalog from {}", description))?;
        info!(anchor = %anchor_date, source = %description, "atlas engine ready");
        Ok(Self::with_catalog(anchor_date, catalog))
    }

    /// Build an engine around an already loaded catalog.
    pub fn with_catalog(anchor_date: NaiveDate, catalog: StarCatalog) -> Self {
        Self {
            anchor_date,
            catalog: Arc::new(catalog),
        }
    }

    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor_date
    }

    pub fn catalog(&self) -> &StarCatalog {
        &self.catalog
    }

    /// Sky Address of a date.
    pub fn compute_coordinate(&self, date: NaiveDate) -> SkyAddress {
        SkyAddress::compute(date, self.anchor_date)
    }

    /// Full payload for a date.
    pub fn generate_payload(&self, date: NaiveDate) -> AtlasPayload {
        let address = self.compute_coordinate(date);
        self.payload_for_address(Some(date), &address)
    }

    /// Full payload for a `YYYY-MM-DD` string.
    pub fn generate_payload_for(&self, date: &str) -> Result<AtlasPayload> {
        Ok(self.generate_payload(parse_date(date)?))
    }

    /// Payload for a coordinate, browsed without a date.
    ///
    /// The constellation is computed for the representative date
    /// `anchor + K`; the payload carries `date: null` and the `S`/`L`/`P`
    /// shorthand fields.
    pub fn payload_for_coordinate(
        &self,
        solar_month: u8,
        lunar_month: u8,
        prime_day: u8,
    ) -> Result<AtlasPayload> {
        let address = SkyAddress::from_coordinate(solar_month, lunar_month, prime_day)?;
        let representative = address.representative_date(self.anchor_date)?;
        debug!(address = %address, representative = %representative, "coordinate browse");
        Ok(self
            .payload_for_address(Some(representative), &address)
            .into_coordinate_view())
    }

    /// Date → address only, without the constellation.
    pub fn convert(&self, date: NaiveDate) -> SkyAddressConversion {
        SkyAddressConversion::new(date, &self.compute_coordinate(date))
    }

    /// Anchors of a gate by name, with their point when coordinates exist.
    pub fn get_anchor_points(&self, gate_id: u8) -> Vec<(String, Option<CelestialPoint>)> {
        self.catalog.anchors(gate_id)
    }

    /// All gates with their anchor names.
    pub fn gates(&self) -> GateListing {
        GateListing::new(|id| {
            self.catalog
                .anchor_names(id)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
    }

    pub fn solar_keys(&self) -> SolarKeyListing {
        payload::solar_keys()
    }

    pub fn lunar_patterns(&self) -> LunarPatternListing {
        payload::lunar_patterns()
    }

    fn payload_for_address(&self, date: Option<NaiveDate>, address: &SkyAddress) -> AtlasPayload {
        let stars = select_stars(&self.catalog, address.prime_day(), address.lunar_month());
        let lines = generate_lines(&stars, address.lunar_month());
        debug!(
            address = %address,
            k = address.k(),
            stars = stars.len(),
            lines = lines.len(),
            "payload assembled"
        );
        assemble(date, self.anchor_date, address, stars, lines)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{EmbeddedCatalog, MockCatalogSource};
    use crate::core::error::AtlasError;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 3).unwrap()
    }

    fn engine() -> AtlasEngine {
        AtlasEngine::from_source(anchor(), &EmbeddedCatalog).unwrap()
    }

    #[test]
    fn test_failing_source_aborts_construction() {
        let mut source = MockCatalogSource::new();
        source.expect_describe().return_const("broken.json".to_string());
        source
            .expect_load()
            .times(1)
            .returning(|| Err(AtlasError::invalid_catalog("truncated document")));

        let err = AtlasEngine::from_source(anchor(), &source).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("broken.json"));
        assert!(text.contains("truncated document"));
    }

    #[test]
    fn test_source_loaded_once() {
        let mut source = MockCatalogSource::new();
        source.expect_describe().return_const("mock".to_string());
        source
            .expect_load()
            .times(1)
            .returning(|| StarCatalog::from_json_str("{}"));

        let engine = AtlasEngine::from_source(anchor(), &source).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
        engine.generate_payload(date);
        engine.generate_payload(date);
    }

    #[test]
    fn test_reference_payload() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
        let payload = engine().generate_payload(date);

        assert_eq!(payload.sky_address, "4•3•3");
        assert_eq!(payload.gate.name, "The Veil of Names");
        assert_eq!(payload.pattern.prime_step, 5);
        // Four gate-3 anchors (Alcyone resolved by name) + 4 + (3 mod 5) secondaries
        assert_eq!(payload.anchor_count(), 4);
        assert_eq!(payload.stars_highlighted.len(), 4 + 7);
        assert!(payload.lines.len() <= 18);
    }

    #[test]
    fn test_coordinate_browse() {
        let payload = engine().payload_for_coordinate(4, 2, 7).unwrap();
        assert_eq!(payload.k, 286);
        assert!(payload.date.is_none());
        assert_eq!((payload.s, payload.l, payload.p), (Some(4), Some(2), Some(7)));
        assert_eq!(payload.gate.id, 7);
    }

    #[test]
    fn test_coordinate_browse_matches_representative_date() {
        let engine = engine();
        let browsed = engine.payload_for_coordinate(9, 12, 5).unwrap();
        let address = SkyAddress::from_coordinate(9, 12, 5).unwrap();
        let dated = engine.generate_payload(address.representative_date(anchor()).unwrap());
        assert_eq!(browsed.stars_highlighted, dated.stars_highlighted);
        assert_eq!(browsed.lines, dated.lines);
    }

    #[test]
    fn test_coordinate_out_of_range() {
        let err = engine().payload_for_coordinate(12, 1, 1).unwrap_err();
        assert!(matches!(err, AtlasError::CoordinateOutOfRange { .. }));
    }

    #[test]
    fn test_coordinate_browse_with_anchor_at_calendar_end() {
        let catalog = StarCatalog::embedded().unwrap();
        let engine = AtlasEngine::with_catalog(NaiveDate::MAX, catalog);
        let err = engine.payload_for_coordinate(11, 13, 7).unwrap_err();
        assert!(matches!(err, AtlasError::InvalidConfig { .. }));
    }

    #[test]
    fn test_generate_payload_for_bad_string() {
        assert!(matches!(
            engine().generate_payload_for("17/01/2026"),
            Err(AtlasError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_gates_listing_uses_catalog() {
        let listing = engine().gates();
        assert_eq!(listing.gates.len(), 7);
        assert_eq!(
            listing.gates[2].anchors,
            vec!["Aldebaran", "Elnath", "Capella", "Alcyone"]
        );
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<AtlasEngine>();
    }
}
