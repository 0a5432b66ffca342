//! Core module for the Celestial Atlas
//!
//! This module provides the pipeline from calendar date to constellation.
//! It follows a modular architecture for testability and extensibility.
//!
//! # Architecture
//!
//! - `error`: Error types using thiserror
//! - `config`: Anchor date and catalog location, layered file/env/flags
//! - `sky_address`: Date ↔ (S, L, P, K) on the 1001-day spiral
//! - `catalog`: Star catalog sources and validation
//! - `celestial`: Star selection, line generation, sphere geometry
//! - `tables`: Gate, Solar Key and Lunar Pattern descriptors
//! - `payload`: Response types and the payload assembler
//! - `engine`: Main AtlasEngine orchestration

pub mod catalog;
pub mod celestial;
pub mod config;
pub mod engine;
pub mod error;
pub mod payload;
pub mod sky_address;
pub mod tables;

// Re-export commonly used types
pub use catalog::{
    CatalogDocument, CatalogSource, CelestialPoint, EmbeddedCatalog, JsonCatalogFile,
    StarCatalog, StarRecord,
};
pub use celestial::{angular_distance, generate_lines, select_stars, Connection};
pub use config::AtlasConfig;
pub use engine::AtlasEngine;
pub use error::{AtlasError, Result, ResultExt};
pub use payload::{
    assemble, AtlasPayload, GateListing, LunarPatternListing, RenderHints,
    SkyAddressConversion, SolarKeyListing,
};
pub use sky_address::{parse_date, SkyAddress, CYCLE_DAYS};
pub use tables::{Gate, LunarPattern, SolarKey};
