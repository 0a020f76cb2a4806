//! Configuration system
//!
//! Settings are plain serde structs. Anything implementing [`Config`] can be
//! loaded from and saved to TOML or RON, picked by file extension.

use crate::input::KeyBindings;
use crate::world::CollisionPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-backed configuration
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a `.toml` or `.ron` file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::of(path)?;
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loading configuration from {}", path.display());

        match format {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to a `.toml` or `.ron` file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::of(path)? {
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents)?;
        log::debug!("Saved configuration to {}", path.display());
        Ok(())
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
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

    /// Values that parse but cannot be used
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Engine configuration
///
/// Missing keys fall back to their defaults, so a file only needs to name
/// what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Milliseconds between movement ticks
    pub movement_period_ms: u64,

    /// Milliseconds between collision ticks
    pub collision_period_ms: u64,

    /// Upper bound on ticks run by a single update; the rest are dropped
    pub max_ticks_per_update: u32,

    /// Width of objects spawned without an explicit size
    pub default_width: i32,

    /// Height of objects spawned without an explicit size
    pub default_height: i32,

    /// Bounce-back distance for moveable characters (0 disables the response)
    pub bounce_back: u32,

    /// Base path of character asset sets
    pub asset_base: String,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Keys driving moveable characters
    pub bindings: KeyBindings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            movement_period_ms: 1,
            collision_period_ms: 1,
            max_ticks_per_update: 1000,
            default_width: 100,
            default_height: 150,
            bounce_back: CollisionPolicy::DEFAULT_BOUNCE_BACK,
            asset_base: "assets".to_string(),
            log_level: "info".to_string(),
            bindings: KeyBindings::default(),
        }
    }
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.movement_period_ms == 0 {
            return Err(ConfigError::Invalid("movement_period_ms must be at least 1".to_string()));
        }
        if self.collision_period_ms == 0 {
            return Err(ConfigError::Invalid("collision_period_ms must be at least 1".to_string()));
        }
        if self.max_ticks_per_update == 0 {
            return Err(ConfigError::Invalid("max_ticks_per_update must be at least 1".to_string()));
        }
        if self.default_width <= 0 || self.default_height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "default size must be positive, got {}x{}",
                self.default_width, self.default_height
            )));
        }
        Ok(())
    }

    /// Collision policy for moveable characters
    pub fn collision_policy(&self) -> CollisionPolicy {
        if self.bounce_back == 0 {
            CollisionPolicy::Ignore
        } else {
            CollisionPolicy::BounceBack(self.bounce_back)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use crate::world::Direction;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.collision_policy(), CollisionPolicy::BounceBack(5));
        assert_eq!(config.bindings.direction_for(KeyCode::Up).unwrap(), Direction::Up);
    }

    #[test]
    fn test_validate_rejects_unusable_values() {
        let zero_period = EngineConfig {
            collision_period_ms: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(zero_period.validate(), Err(ConfigError::Invalid(_))));

        let flat = EngineConfig {
            default_height: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(flat.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_negative_bounce_back_does_not_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backwards.toml");
        std::fs::write(&path, "bounce_back = -3\n").unwrap();
        assert!(matches!(EngineConfig::load_from_file(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_bounce_back_disables_response() {
        let config = EngineConfig {
            bounce_back: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.collision_policy(), CollisionPolicy::Ignore);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        let config = EngineConfig {
            movement_period_ms: 16,
            bindings: KeyBindings::wasd(),
            ..EngineConfig::default()
        };

        config.save_to_file(&path).unwrap();
        let loaded = EngineConfig::load_from_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.ron");
        let config = EngineConfig {
            asset_base: "sprites".to_string(),
            bounce_back: 8,
            ..EngineConfig::default()
        };

        config.save_to_file(&path).unwrap();

        assert_eq!(EngineConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "collision_period_ms = 5\nlog_level = \"debug\"\n").unwrap();

        let loaded = EngineConfig::load_from_file(&path).unwrap();

        assert_eq!(loaded.collision_period_ms, 5);
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.default_width, 100);
        assert_eq!(loaded.bindings, KeyBindings::arrows());
    }

    #[test]
    fn test_unsupported_extension() {
        let config = EngineConfig::default();
        assert!(matches!(
            config.save_to_file("engine.json"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            EngineConfig::load_from_file("engine.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(EngineConfig::load_from_file(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        std::fs::write(&path, "(movement_period_ms: ").unwrap();
        assert!(matches!(EngineConfig::load_from_file(&path), Err(ConfigError::Parse(_))));
    }
}
