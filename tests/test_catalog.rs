//! Catalog Source Tests
//!
//! Loading star catalogs from disk and wiring them into the engine.

use std::fs;
use std::path::PathBuf;

use celestial_atlas::core::catalog::JsonCatalogFile;
use celestial_atlas::{parse_date, AtlasConfig, AtlasEngine, AtlasError, CatalogSource};
use tempfile::TempDir;

const SMALL_CATALOG: &str = r#"{
    "named_stars": {
        "Mizar": { "hr": 5054, "ra": 200.981, "dec": 54.925, "magnitude": 2.23 }
    },
    "gates": [
        {
            "id": 3,
            "name": "The Veil of Names",
            "anchors": [
                { "name": "Dubhe", "data": { "hr": 4301, "ra": 165.932, "dec": 61.751, "magnitude": 1.79 } },
                { "name": "Mizar" },
                { "name": "Nowhere" }
            ]
        }
    ],
    "bright_stars": [
        { "hr": 2491, "name": "Sirius", "ra": 101.287, "dec": -16.716, "magnitude": -1.46 },
        { "hr": 5340, "name": "Arcturus", "ra": 213.915, "dec": 19.182, "magnitude": -0.05 },
        { "hr": 7001, "name": "Vega", "ra": 279.234, "dec": 38.784, "magnitude": 0.03 },
        { "hr": 1713, "name": "Rigel", "ra": 78.634, "dec": -8.202, "magnitude": 0.13 },
        { "hr": 2943, "ra": 114.825, "dec": 5.225, "magnitude": 0.34 },
        { "hr": 472, "name": "Achernar", "ra": 24.429, "dec": -57.237, "magnitude": 0.46 },
        { "hr": 2061, "name": "Betelgeuse", "ra": 88.793, "dec": 7.407, "magnitude": 0.5 },
        { "hr": 7557, "name": "Altair", "ra": 297.696, "dec": 8.868, "magnitude": 0.77 }
    ]
}"#;

fn write_catalog(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("stars.json");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_json_catalog_file_loads() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, SMALL_CATALOG);

    let source = JsonCatalogFile::new(&path);
    assert_eq!(source.describe(), path.display().to_string());

    let catalog = source.load().unwrap();
    assert_eq!(catalog.gate_count(), 1);
    assert_eq!(catalog.bright_stars().len(), 8);
    assert_eq!(catalog.anchor_names(3), vec!["Dubhe", "Mizar", "Nowhere"]);
}

#[test]
fn test_engine_uses_configured_catalog() {
    let dir = TempDir::new().unwrap();
    let config = AtlasConfig {
        catalog: Some(write_catalog(&dir, SMALL_CATALOG)),
        ..AtlasConfig::default()
    };
    let engine = AtlasEngine::new(&config).unwrap();

    // 2026-01-17 is 4•3•3: gate 3, 4 + 3 secondaries
    let payload = engine.generate_payload(parse_date("2026-01-17").unwrap());
    let names: Vec<&str> = payload
        .stars_highlighted
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Dubhe",
            "Mizar",
            "Sirius",
            "Arcturus",
            "Vega",
            "Rigel",
            "HR2943",
            "Achernar",
            "Betelgeuse",
        ]
    );
    assert_eq!(payload.anchor_count(), 2);
}

#[test]
fn test_unresolvable_anchor_reported_without_point() {
    let dir = TempDir::new().unwrap();
    let config = AtlasConfig {
        catalog: Some(write_catalog(&dir, SMALL_CATALOG)),
        ..AtlasConfig::default()
    };
    let engine = AtlasEngine::new(&config).unwrap();

    let anchors = engine.get_anchor_points(3);
    assert_eq!(anchors.len(), 3);
    assert!(anchors[0].1.is_some());
    assert!(anchors[1].1.is_some());
    assert_eq!(anchors[2].0, "Nowhere");
    assert!(anchors[2].1.is_none());
}

#[test]
fn test_gate_without_anchors_uses_secondaries_only() {
    let dir = TempDir::new().unwrap();
    let config = AtlasConfig {
        catalog: Some(write_catalog(&dir, SMALL_CATALOG)),
        ..AtlasConfig::default()
    };
    let engine = AtlasEngine::new(&config).unwrap();

    // 4•2•7: gate 7 is absent from this catalog, L=2 gives 6 secondaries
    let payload = engine.payload_for_coordinate(4, 2, 7).unwrap();
    assert_eq!(payload.anchor_count(), 0);
    assert_eq!(payload.stars_highlighted.len(), 6);
    assert_eq!(payload.gate.id, 7);
}

#[test]
fn test_missing_catalog_file() {
    let dir = TempDir::new().unwrap();
    let config = AtlasConfig {
        catalog: Some(dir.path().join("absent.json")),
        ..AtlasConfig::default()
    };
    let err = AtlasEngine::new(&config).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_malformed_catalog_file() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, r#"{ "bright_stars": [ { "hr": "#);

    assert!(JsonCatalogFile::new(&path).load().is_err());
}

#[test]
fn test_invalid_catalog_values_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(
        &dir,
        r#"{ "bright_stars": [ { "hr": 1, "ra": 10.0, "dec": 95.0 } ] }"#,
    );

    let err = JsonCatalogFile::new(&path).load().unwrap_err();
    let text = err.to_string();
    assert!(text.contains("stars.json"), "{}", text);
    assert!(matches!(
        err,
        AtlasError::WithContext { .. } | AtlasError::InvalidCatalog { .. }
    ));
}
