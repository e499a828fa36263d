//! Checker configuration

use std::path::Path;

use rss_physics::{Distance, Quantity};
use serde::{Deserialize, Serialize};

use crate::error::{RssError, RssResult};

/// Global lower bounds applied on top of the computed safe distances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RssConfig {
    /// Minimum longitudinal gap between two vehicles (m)
    pub min_longitudinal_distance: Distance,

    /// Minimum lateral gap between two vehicles (m)
    pub min_lateral_distance: Distance,
}

impl Default for RssConfig {
    fn default() -> Self {
        Self {
            min_longitudinal_distance: Distance::ZERO,
            min_lateral_distance: Distance::ZERO,
        }
    }
}

impl RssConfig {
    /// Validate that both minimums are finite and non-negative
    pub fn validate(&self) -> RssResult<()> {
        for (name, value) in [
            ("min_longitudinal_distance", self.min_longitudinal_distance),
            ("min_lateral_distance", self.min_lateral_distance),
        ] {
            if !value.is_valid() || value < Distance::ZERO {
                return Err(RssError::Config(format!(
                    "{name} must be a finite, non-negative distance, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate from JSON
    pub fn from_json(json: &str) -> RssResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RssError::Config(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a config file, overridden by `RSS_*` environment variables
    pub fn load(path: impl AsRef<Path>) -> RssResult<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("RSS"))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| RssError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RssConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_longitudinal_distance, Distance::ZERO);
    }

    #[test]
    fn test_from_json() {
        let config = RssConfig::from_json(r#"{"min_longitudinal_distance": 2.5}"#).unwrap();
        assert_eq!(config.min_longitudinal_distance, Distance::new(2.5));
        assert_eq!(config.min_lateral_distance, Distance::ZERO);
    }

    #[test]
    fn test_from_json_rejects_negative() {
        let result = RssConfig::from_json(r#"{"min_lateral_distance": -1.0}"#);
        assert!(matches!(result, Err(RssError::Config(_))));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(RssConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("rss_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"min_longitudinal_distance": 1.0, "min_lateral_distance": 0.25}"#).unwrap();

        let config = RssConfig::load(&path);
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.min_longitudinal_distance, Distance::new(1.0));
        assert_eq!(config.min_lateral_distance, Distance::new(0.25));
    }

    #[test]
    fn test_load_missing_file() {
        let result = RssConfig::load("/nonexistent/rss_config.json");
        assert!(matches!(result, Err(RssError::Config(_))));
    }
}
