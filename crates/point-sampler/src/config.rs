//! Configuration for a point-sampling session.

use std::path::Path;

use sampling_common::Palette;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SamplerError};

/// Maximum number of sample points kept by default.
pub const DEFAULT_MAX_POINTS: usize = 10;

/// Configuration for a point-sampling session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of points in the store.
    pub max_points: usize,

    /// Distance (in dataset coordinate units, per axis) under which a click
    /// is treated as landing on an existing marker.
    pub match_tolerance: f64,

    /// What happens to a new click when the store is full.
    pub capacity_policy: CapacityPolicy,

    /// Name of the categorical palette used for curve colors.
    pub palette: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_POINTS,
            match_tolerance: 1e-9,
            capacity_policy: CapacityPolicy::Reject,
            palette: "category10".to_string(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("SAMPLER_MAX_POINTS") {
            if let Ok(max) = val.parse() {
                config.max_points = max;
            }
        }

        if let Ok(val) = std::env::var("SAMPLER_MATCH_TOLERANCE") {
            if let Ok(tol) = val.parse() {
                config.match_tolerance = tol;
            }
        }

        if let Ok(val) = std::env::var("SAMPLER_CAPACITY_POLICY") {
            config.capacity_policy = CapacityPolicy::from_str(&val);
        }

        if let Ok(val) = std::env::var("SAMPLER_PALETTE") {
            config.palette = val;
        }

        config
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SamplerError::config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_points == 0 {
            return Err(SamplerError::config("max_points must be > 0"));
        }

        if !self.match_tolerance.is_finite() || self.match_tolerance < 0.0 {
            return Err(SamplerError::config(
                "match_tolerance must be a finite value >= 0",
            ));
        }

        Palette::named(&self.palette)?;

        Ok(())
    }

    /// Resolve the configured palette.
    pub fn palette(&self) -> Result<Palette> {
        Ok(Palette::named(&self.palette)?)
    }
}

/// Behavior when a new point arrives at a full store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// Ignore the new point.
    #[default]
    Reject,
    /// Drop the oldest point to admit the new one.
    EvictOldest,
}

impl CapacityPolicy {
    /// Parse from string (case-insensitive). Unknown values fall back to `Reject`.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().replace('-', "_").as_str() {
            "evict_oldest" | "evict" | "fifo" => Self::EvictOldest,
            _ => Self::Reject,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::EvictOldest => "evict_oldest",
        }
    }
}

impl std::fmt::Display for CapacityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.max_points, 10);
        assert_eq!(config.capacity_policy, CapacityPolicy::Reject);
        assert_eq!(config.palette, "category10");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SessionConfig::default();
        config.max_points = 0;
        assert!(config.validate().is_err());

        config = SessionConfig::default();
        config.match_tolerance = -1.0;
        assert!(config.validate().is_err());

        config = SessionConfig::default();
        config.match_tolerance = f64::NAN;
        assert!(config.validate().is_err());

        config = SessionConfig::default();
        config.palette = "rainbow-unicorn".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_capacity_policy_from_str() {
        assert_eq!(CapacityPolicy::from_str("reject"), CapacityPolicy::Reject);
        assert_eq!(
            CapacityPolicy::from_str("EVICT-OLDEST"),
            CapacityPolicy::EvictOldest
        );
        assert_eq!(CapacityPolicy::from_str("fifo"), CapacityPolicy::EvictOldest);
        assert_eq!(CapacityPolicy::from_str("whatever"), CapacityPolicy::Reject);
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("SAMPLER_MAX_POINTS", "4");
        std::env::set_var("SAMPLER_CAPACITY_POLICY", "evict_oldest");
        std::env::set_var("SAMPLER_MATCH_TOLERANCE", "not-a-number");

        let config = SessionConfig::from_env();
        assert_eq!(config.max_points, 4);
        assert_eq!(config.capacity_policy, CapacityPolicy::EvictOldest);
        assert_eq!(config.match_tolerance, 1e-9);

        std::env::set_var("SAMPLER_MAX_POINTS", "lots");
        assert_eq!(SessionConfig::from_env().max_points, DEFAULT_MAX_POINTS);

        std::env::remove_var("SAMPLER_MAX_POINTS");
        std::env::remove_var("SAMPLER_CAPACITY_POLICY");
        std::env::remove_var("SAMPLER_MATCH_TOLERANCE");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SessionConfig::from_json(r#"{ "max_points": 4 }"#).unwrap();
        assert_eq!(config.max_points, 4);
        assert_eq!(config.palette, "category10");
    }
}
