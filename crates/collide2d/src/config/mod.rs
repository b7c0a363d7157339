//! Configuration system
//!
//! Collision policy knobs live in [`CollisionConfig`], loadable from TOML or
//! RON through the [`Config`] trait. The format is picked from the file
//! extension.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::foundation::math::{try_normalize, Vec2};
use crate::physics::collision::EdgeClosure;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => Self::from_toml_str(&contents),
            ConfigFormat::Ron => Self::from_ron_str(&contents),
        }
    }

    /// Save configuration to file
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => self.to_toml_string()?,
            ConfigFormat::Ron => self.to_ron_string()?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }

    /// Parse from a TOML document
    fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse from a RON document
    fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize to a TOML document
    fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Serialize to a RON document
    fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Policy settings for the narrow-phase and segment tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Whether segment tests include the closing edge (last point back to first)
    pub segment_edges: EdgeClosure,

    /// Overlaps closer than this are treated as equal when picking the
    /// minimum-penetration axis; the earlier axis in canonical order wins
    pub tie_epsilon: f64,

    /// Separation axis used when two circle centers coincide
    pub degenerate_axis: [f64; 2],
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            segment_edges: EdgeClosure::Open,
            tie_epsilon: 1e-9,
            degenerate_axis: [1.0, 0.0],
        }
    }
}

impl Config for CollisionConfig {}

impl CollisionConfig {
    /// Builder pattern: set the segment edge policy
    pub fn with_segment_edges(mut self, segment_edges: EdgeClosure) -> Self {
        self.segment_edges = segment_edges;
        self
    }

    /// Builder pattern: set the tie-break tolerance
    pub fn with_tie_epsilon(mut self, tie_epsilon: f64) -> Self {
        self.tie_epsilon = tie_epsilon;
        self
    }

    /// Unit axis for coincident circle centers; falls back to `(1, 0)` if the
    /// configured axis is zero or not finite
    pub fn degenerate_axis(&self) -> Vec2 {
        let [x, y] = self.degenerate_axis;
        let axis = Vec2::new(x, y);
        if !axis.iter().all(|c| c.is_finite()) {
            return Vec2::x();
        }
        try_normalize(axis).unwrap_or_else(Vec2::x)
    }

    /// Tie tolerance clamped to a usable value
    pub fn tie_epsilon(&self) -> f64 {
        if self.tie_epsilon.is_finite() {
            self.tie_epsilon.max(0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = CollisionConfig::default();
        assert_eq!(config.segment_edges, EdgeClosure::Open);
        assert_eq!(config.degenerate_axis(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CollisionConfig::default()
            .with_segment_edges(EdgeClosure::Closed)
            .with_tie_epsilon(1e-6);

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("segment_edges = \"closed\""));

        let parsed = CollisionConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_ron_roundtrip() {
        let config = CollisionConfig {
            degenerate_axis: [0.0, 2.0],
            ..CollisionConfig::default()
        };

        let text = config.to_ron_string().unwrap();
        let parsed = CollisionConfig::from_ron_str(&text).unwrap();
        assert_eq!(parsed, config);
        assert_relative_eq!(parsed.degenerate_axis(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = CollisionConfig::from_toml_str("segment_edges = \"closed\"\n").unwrap();
        assert_eq!(parsed.segment_edges, EdgeClosure::Closed);
        assert_relative_eq!(parsed.tie_epsilon, 1e-9);
    }

    #[test]
    fn test_degenerate_axis_falls_back_for_zero() {
        let config = CollisionConfig {
            degenerate_axis: [0.0, 0.0],
            ..CollisionConfig::default()
        };
        assert_eq!(config.degenerate_axis(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = CollisionConfig::default().save_to_file("collision.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("collide2d_config_{}.toml", std::process::id()));
        let config = CollisionConfig::default().with_segment_edges(EdgeClosure::Closed);

        config.save_to_file(&path).unwrap();
        let loaded = CollisionConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }
}
