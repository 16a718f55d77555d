//! # World Configuration
//!
//! Capacity limits fixed at world creation. Loaded once at startup, either
//! built in code or parsed from TOML:
//!
//! ```toml
//! max_entities = 1000
//! max_component_types = 4
//! max_systems = 3
//! ```

use crate::ecs::MAX_COMPONENT_TYPES;
use crate::error::{EcsError, EcsResult};
use serde::{Deserialize, Serialize};

/// Fixed capacities of a [`World`](crate::World).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Number of entity slots. Never grows.
    pub max_entities: u32,
    /// Number of component ids the world accepts (ids `0..max_component_types`).
    pub max_component_types: u8,
    /// Number of systems across all phases.
    pub max_systems: u32,
}

impl WorldConfig {
    /// Creates a configuration from explicit limits.
    #[must_use]
    pub const fn new(max_entities: u32, max_component_types: u8, max_systems: u32) -> Self {
        Self {
            max_entities,
            max_component_types,
            max_systems,
        }
    }

    /// Parses and validates a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] on malformed TOML or limits that
    /// fail [`validate`](Self::validate).
    pub fn from_toml_str(source: &str) -> EcsResult<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| EcsError::InvalidConfig(format!("failed to parse world config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the limits.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] if `max_entities` is zero or
    /// `u32::MAX` (reserved for the null handle), or if
    /// `max_component_types` is zero or above 64.
    pub fn validate(&self) -> EcsResult<()> {
        if self.max_entities == 0 {
            return Err(EcsError::InvalidConfig(
                "max_entities must be greater than zero".to_string(),
            ));
        }
        if self.max_entities == u32::MAX {
            return Err(EcsError::InvalidConfig(
                "max_entities must be below u32::MAX".to_string(),
            ));
        }
        if self.max_component_types == 0 || self.max_component_types > MAX_COMPONENT_TYPES {
            return Err(EcsError::InvalidConfig(format!(
                "max_component_types must be in 1..={MAX_COMPONENT_TYPES}, got {}",
                self.max_component_types
            )));
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(1000, MAX_COMPONENT_TYPES, 32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let config = WorldConfig::from_toml_str(
            "max_entities = 1000\nmax_component_types = 4\nmax_systems = 3\n",
        )
        .unwrap();
        assert_eq!(config, WorldConfig::new(1000, 4, 3));
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = WorldConfig::from_toml_str("max_entities = 10").unwrap();
        assert_eq!(config.max_entities, 10);
        assert_eq!(config.max_component_types, 64);
        assert_eq!(config.max_systems, 32);
    }

    #[test]
    fn test_rejects_bad_limits() {
        assert!(matches!(
            WorldConfig::from_toml_str("max_entities = 0"),
            Err(EcsError::InvalidConfig(_))
        ));
        assert!(matches!(
            WorldConfig::new(10, 65, 1).validate(),
            Err(EcsError::InvalidConfig(_))
        ));
        assert!(WorldConfig::new(u32::MAX, 8, 1).validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_syntax() {
        assert!(WorldConfig::from_toml_str("max_entites = 10").is_err());
        assert!(WorldConfig::from_toml_str("max_entities = ").is_err());
    }
}
