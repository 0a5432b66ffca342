//! Atlas configuration
//!
//! Resolution order, later layers winning:
//!
//! 1. Built-in defaults (anchor 2025-04-03, embedded catalog)
//! 2. JSON config file (`--config`, else the per-user default path if present)
//! 3. Environment (`ATLAS_ANCHOR_DATE`, `ATLAS_CATALOG`)
//! 4. Command-line flags, applied by the binary

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::catalog::{CatalogSource, EmbeddedCatalog, JsonCatalogFile};
use crate::core::error::{AtlasError, Result, ResultExt};
use crate::core::sky_address::parse_date;

/// Environment variable overriding the anchor date.
pub const ENV_ANCHOR_DATE: &str = "ATLAS_ANCHOR_DATE";

/// Environment variable overriding the catalog path.
pub const ENV_CATALOG: &str = "ATLAS_CATALOG";

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "celestial-atlas";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Day zero of the spiral unless configured otherwise.
pub fn default_anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 3).unwrap_or_default()
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AtlasConfig {
    /// Date at K = 0
    #[serde(default = "default_anchor_date")]
    pub anchor_date: NaiveDate,
    /// Catalog document; `None` uses the embedded catalog
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            anchor_date: default_anchor_date(),
            catalog: None,
        }
    }
}

impl AtlasConfig {
    /// Per-user config path, e.g. `~/.config/celestial-atlas/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read a config file. The file must exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(AtlasError::from)
            .context(format!("config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| AtlasError::invalid_config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), anchor = %config.anchor_date, "config file read");
        Ok(config)
    }

    /// Load from an explicit file, or from the default path when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Apply `ATLAS_ANCHOR_DATE` and `ATLAS_CATALOG` from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the environment in production).
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_ANCHOR_DATE).filter(|v| !v.trim().is_empty()) {
            self.anchor_date = parse_date(&value).context(ENV_ANCHOR_DATE)?;
        }
        if let Some(value) = lookup(ENV_CATALOG).filter(|v| !v.trim().is_empty()) {
            self.catalog = Some(PathBuf::from(value));
        }
        Ok(())
    }

    /// The catalog source this config points at.
    pub fn catalog_source(&self) -> Box<dyn CatalogSource> {
        match &self.catalog {
            Some(path) => Box::new(JsonCatalogFile::new(path)),
            None => Box::new(EmbeddedCatalog),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AtlasConfig::default();
        assert_eq!(config.anchor_date.to_string(), "2025-04-03");
        assert!(config.catalog.is_none());
        assert_eq!(config.catalog_source().describe(), "embedded catalog");
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"anchor_date": "2024-01-01", "catalog": "/tmp/stars.json"}"#)
            .unwrap();

        let config = AtlasConfig::from_file(&path).unwrap();
        assert_eq!(config.anchor_date.to_string(), "2024-01-01");
        assert_eq!(config.catalog, Some(PathBuf::from("/tmp/stars.json")));
        assert_eq!(config.catalog_source().describe(), "/tmp/stars.json");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"catalog": "stars.json"}"#).unwrap();

        let config = AtlasConfig::from_file(&path).unwrap();
        assert_eq!(config.anchor_date, default_anchor_date());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"anchor": "2024-01-01"}"#).unwrap();

        let err = AtlasConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, AtlasError::InvalidConfig { .. }));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = AtlasConfig::load(Some(Path::new("/nonexistent/atlas.json")));
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_ANCHOR_DATE, "2030-06-01"),
            (ENV_CATALOG, "/data/stars.json"),
        ]
        .into_iter()
        .collect();

        let mut config = AtlasConfig::default();
        config
            .apply_env_from(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.anchor_date.to_string(), "2030-06-01");
        assert_eq!(config.catalog, Some(PathBuf::from("/data/stars.json")));
    }

    #[test]
    fn test_env_bad_date_fails() {
        let mut config = AtlasConfig::default();
        let err = config
            .apply_env_from(|k| (k == ENV_ANCHOR_DATE).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_ANCHOR_DATE));
    }

    #[test]
    fn test_env_empty_values_ignored() {
        let mut config = AtlasConfig::default();
        config.apply_env_from(|_| Some(String::new())).unwrap();
        assert_eq!(config, AtlasConfig::default());
    }
}
