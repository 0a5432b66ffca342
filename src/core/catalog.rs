//! Star Catalog
//!
//! Read-only star data behind the constellations. A catalog document holds:
//!
//! - `named_stars`: name-indexed star records
//! - `gates`: gate id → ordered anchor stars (inline `data` or resolved by name)
//! - `bright_stars`: general stars ordered by brightness, brightest first
//!
//! Catalogs are validated once at load time and never mutated afterwards.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::error::{AtlasError, Result, ResultExt};
use crate::core::sky_address::PRIME_DAYS;

#[cfg(test)]
use mockall::automock;

/// The catalog bundled with the crate.
pub const EMBEDDED_CATALOG: &str = include_str!("../../data/stars.json");

// =============================================================================
// Celestial Point
// =============================================================================

/// A star as it appears in a constellation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CelestialPoint {
    /// Identifier used by connection lines
    pub id: String,
    /// Display name
    pub name: String,
    /// Right ascension in degrees
    pub ra: f64,
    /// Declination in degrees
    pub dec: f64,
    /// Visual magnitude (lower is brighter)
    pub magnitude: Option<f64>,
    /// Whether the point is one of the gate's anchors
    pub is_anchor: bool,
}

// =============================================================================
// Catalog Document (wire format)
// =============================================================================

/// A star record. Every field may be missing in the source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    /// Harvard Revised (Bright Star) catalog number
    #[serde(default)]
    pub hr: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ra: Option<f64>,
    #[serde(default)]
    pub dec: Option<f64>,
    #[serde(default)]
    pub magnitude: Option<f64>,
}

impl StarRecord {
    /// Right ascension and declination, if both are present.
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.ra?, self.dec?))
    }

    /// Catalog reference string, `HR<number>` (`HR0` when unnumbered).
    pub fn catalog_ref(&self) -> String {
        format!("HR{}", self.hr.unwrap_or(0))
    }
}

/// An anchor star entry under a gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorRecord {
    pub name: String,
    #[serde(default)]
    pub data: Option<StarRecord>,
}

/// A gate entry listing its anchors in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRecord {
    pub id: u8,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub anchors: Vec<AnchorRecord>,
}

/// Top-level catalog document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub named_stars: BTreeMap<String, StarRecord>,
    #[serde(default)]
    pub gates: Vec<GateRecord>,
    #[serde(default)]
    pub bright_stars: Vec<StarRecord>,
}

// =============================================================================
// Star Catalog
// =============================================================================

/// A validated, immutable star catalog.
#[derive(Debug, Clone, Default)]
pub struct StarCatalog {
    named_stars: BTreeMap<String, StarRecord>,
    gates: BTreeMap<u8, Vec<AnchorRecord>>,
    bright_stars: Vec<StarRecord>,
}

impl StarCatalog {
    /// Parse and validate a JSON catalog document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Validate a parsed document.
    pub fn from_document(document: CatalogDocument) -> Result<Self> {
        let mut seen = HashSet::new();
        for gate in &document.gates {
            if gate.id == 0 || gate.id > PRIME_DAYS {
                return Err(AtlasError::invalid_catalog(format!(
                    "gate id {} outside 1-{}",
                    gate.id, PRIME_DAYS
                )));
            }
            if !seen.insert(gate.id) {
                return Err(AtlasError::invalid_catalog(format!(
                    "gate {} listed more than once",
                    gate.id
                )));
            }
            for anchor in &gate.anchors {
                if let Some(data) = &anchor.data {
                    validate_record(&anchor.name, data)?;
                }
            }
        }
        for (name, record) in &document.named_stars {
            validate_record(name, record)?;
        }
        for record in &document.bright_stars {
            validate_record(&record.catalog_ref(), record)?;
        }

        let gates = document
            .gates
            .into_iter()
            .map(|g| (g.id, g.anchors))
            .collect();

        Ok(Self {
            named_stars: document.named_stars,
            gates,
            bright_stars: document.bright_stars,
        })
    }

    /// The catalog bundled with the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_CATALOG).context("embedded catalog")
    }

    /// Anchor names of a gate in catalog order.
    pub fn anchor_names(&self, gate_id: u8) -> Vec<&str> {
        self.gates
            .get(&gate_id)
            .map(|anchors| anchors.iter().map(|a| a.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Anchors of a gate, each resolved to a point when coordinates exist.
    ///
    /// Inline anchor data wins; otherwise the name is looked up in
    /// `named_stars`. Unknown gates have no anchors.
    pub fn anchors(&self, gate_id: u8) -> Vec<(String, Option<CelestialPoint>)> {
        let Some(anchors) = self.gates.get(&gate_id) else {
            return Vec::new();
        };

        anchors
            .iter()
            .map(|anchor| {
                let point = anchor
                    .data
                    .as_ref()
                    .filter(|d| d.position().is_some())
                    .or_else(|| self.named_stars.get(&anchor.name))
                    .and_then(|record| anchor_point(&anchor.name, record));
                (anchor.name.clone(), point)
            })
            .collect()
    }

    /// General stars, brightest first.
    pub fn bright_stars(&self) -> &[StarRecord] {
        &self.bright_stars
    }

    /// Number of gates carrying an anchor list.
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }
}

fn anchor_point(name: &str, record: &StarRecord) -> Option<CelestialPoint> {
    let (ra, dec) = record.position()?;
    Some(CelestialPoint {
        id: name.to_string(),
        name: name.to_string(),
        ra,
        dec,
        magnitude: record.magnitude,
        is_anchor: true,
    })
}

fn validate_record(label: &str, record: &StarRecord) -> Result<()> {
    for (field, value) in [
        ("ra", record.ra),
        ("dec", record.dec),
        ("magnitude", record.magnitude),
    ] {
        if let Some(v) = value {
            if !v.is_finite() {
                return Err(AtlasError::invalid_catalog(format!(
                    "{}: {} is not a finite number",
                    label, field
                )));
            }
        }
    }
    if let Some(dec) = record.dec {
        if !(-90.0..=90.0).contains(&dec) {
            return Err(AtlasError::invalid_catalog(format!(
                "{}: declination {} outside [-90, 90]",
                label, dec
            )));
        }
    }
    Ok(())
}

// =============================================================================
// Catalog Sources
// =============================================================================

/// Where a catalog comes from.
///
/// Sources are read once when an engine is built; a failing source aborts
/// construction.
#[cfg_attr(test, automock)]
pub trait CatalogSource: Send + Sync {
    /// Load and validate the catalog
    fn load(&self) -> Result<StarCatalog>;

    /// Short description for log lines
    fn describe(&self) -> String;
}

/// The bundled `data/stars.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalog;

impl CatalogSource for EmbeddedCatalog {
    fn load(&self) -> Result<StarCatalog> {
        StarCatalog::embedded()
    }

    fn describe(&self) -> String {
        "embedded catalog".to_string()
    }
}

/// A catalog document on disk.
#[derive(Debug, Clone)]
pub struct JsonCatalogFile {
    path: PathBuf,
}

impl JsonCatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonCatalogFile {
    fn load(&self) -> Result<StarCatalog> {
        if !self.path.exists() {
            return Err(AtlasError::CatalogNotFound {
                path: self.path.clone(),
            });
        }
        debug!(path = %self.path.display(), "reading catalog");
        let content = fs::read_to_string(&self.path)?;
        let catalog = StarCatalog::from_json_str(&content)
            .context(format!("catalog {}", self.path.display()))?;
        info!(
            path = %self.path.display(),
            gates = catalog.gate_count(),
            bright_stars = catalog.bright_stars().len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// =============================================================================
// Tests
// =============================================================================
