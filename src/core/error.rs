//! Error types for celestial_atlas
//!
//! This module provides structured error handling using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for atlas operations
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Errors that can occur while loading catalogs or resolving requests
#[derive(Error, Debug)]
pub enum AtlasError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog file not found
    #[error("Catalog not found: {path}")]
    CatalogNotFound { path: PathBuf },

    /// Catalog parsed but violates its structural rules
    #[error("Invalid catalog: {message}")]
    InvalidCatalog { message: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Date string that is not YYYY-MM-DD
    #[error("Invalid date '{input}'. Use YYYY-MM-DD")]
    InvalidDate { input: String },

    /// Sky Address axis outside its cycle range
    #[error("{axis} out of range: {value} (expected {min}-{max})")]
    CoordinateOutOfRange {
        axis: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AtlasError>,
    },
}

impl AtlasError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AtlasError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid catalog error
    pub fn invalid_catalog(message: impl Into<String>) -> Self {
        AtlasError::InvalidCatalog {
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        AtlasError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid date error
    pub fn invalid_date(input: impl Into<String>) -> Self {
        AtlasError::InvalidDate {
            input: input.into(),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}
