//! celestial_atlas - Sky Addresses and their constellations
//!
//! This library maps calendar dates onto the 1001-day spiral and derives
//! the day's constellation. It is designed to be consumed by:
//! - The CLI binary (src/bin/atlas.rs)
//! - Service layers that expose the engine over a network
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs** (this file): Pure logic, no CLI concerns
//! - **bin/atlas.rs**: Thin wrapper that calls the library
//!
//! # Example
//!
//! ```
//! use celestial_atlas::{AtlasConfig, AtlasEngine, parse_date};
//!
//! let engine = AtlasEngine::new(&AtlasConfig::default()).unwrap();
//! let payload = engine.generate_payload(parse_date("2026-01-17").unwrap());
//! assert_eq!(payload.sky_address, "4•3•3");
//! assert_eq!(payload.gate.name, "The Veil of Names");
//! ```

pub mod core;

pub use crate::core::{
    angular_distance, parse_date, AtlasConfig, AtlasEngine, AtlasError, AtlasPayload,
    CatalogSource, CelestialPoint, Connection, Result, SkyAddress, StarCatalog,
};

/// Crate version, as published in Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
