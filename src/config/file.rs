//! TOML configuration file format.

use super::params::{ConfigError, FabricationConfig, OpticsConfig, PackingConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full configuration for one sieve layout.
///
/// Every table is optional in the file; missing tables fall back to
/// the defaults for a 512.5nm, f=72mm, 31-zone sieve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SieveConfig {
    /// Zone plate optics.
    #[serde(default)]
    pub optics: OpticsConfig,
    /// Pinhole size and spacing limits.
    #[serde(default)]
    pub fabrication: FabricationConfig,
    /// Sampling budget, seed and exhaustion policy.
    #[serde(default)]
    pub packing: PackingConfig,
}

impl SieveConfig {
    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SieveConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every parameter group.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.optics.validate()?;
        self.fabrication.validate()?;
        self.packing.validate()?;
        Ok(())
    }
}
