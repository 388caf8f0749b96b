//! Validated parameter groups.

use serde::{Deserialize, Serialize};

/// Optical constants of the underlying Fresnel zone plate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticsConfig {
    /// Design wavelength in millimeters.
    pub wavelength_mm: f64,
    /// Focal distance in millimeters.
    pub focal_distance_mm: f64,
    /// Number of zone boundaries in the underlying zone plate.
    pub zones: u32,
}

impl Default for OpticsConfig {
    fn default() -> Self {
        Self {
            wavelength_mm: 0.0005125, // 512.5nm
            focal_distance_mm: 72.0,
            zones: 31,
        }
    }
}

impl OpticsConfig {
    /// Rejects non-positive or non-finite constants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.wavelength_mm.is_finite() && self.wavelength_mm > 0.0) {
            return Err(ConfigError::InvalidWavelength(self.wavelength_mm));
        }
        if !(self.focal_distance_mm.is_finite() && self.focal_distance_mm > 0.0) {
            return Err(ConfigError::InvalidFocalDistance(self.focal_distance_mm));
        }
        if self.zones == 0 {
            return Err(ConfigError::InvalidZoneCount);
        }
        Ok(())
    }
}

/// Fabrication limits and the per-ring fill target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FabricationConfig {
    /// Absolute floor on pinhole radius in millimeters (the minimum feature size).
    pub min_feature_mm: f64,
    /// Minimum edge-to-edge clearance between pinholes in millimeters.
    pub min_spacing_mm: f64,
    /// Ring width multiplier giving the largest allowed pinhole radius.
    pub max_factor: f64,
    /// Fraction of each ring's area to open with pinholes.
    pub area_prop: f64,
}

impl Default for FabricationConfig {
    fn default() -> Self {
        Self {
            min_feature_mm: 0.003,
            min_spacing_mm: 0.003,
            max_factor: 1.53,
            area_prop: 0.40,
        }
    }
}

impl FabricationConfig {
    /// Rejects limits that would make the sampling ranges meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_feature_mm.is_finite() && self.min_feature_mm > 0.0) {
            return Err(ConfigError::InvalidMinFeature(self.min_feature_mm));
        }
        if !(self.min_spacing_mm.is_finite() && self.min_spacing_mm >= 0.0) {
            return Err(ConfigError::InvalidMinSpacing(self.min_spacing_mm));
        }
        if !(self.max_factor.is_finite() && self.max_factor > 0.0) {
            return Err(ConfigError::InvalidMaxFactor(self.max_factor));
        }
        if !(self.area_prop > 0.0 && self.area_prop <= 1.0) {
            return Err(ConfigError::InvalidAreaProportion(self.area_prop));
        }
        Ok(())
    }
}

/// What the sieve builder does when a ring runs out of attempts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhaustionPolicy {
    /// Stop building and report the ring that failed.
    #[default]
    Abort,
    /// Leave the ring out of the sieve and keep going.
    Skip,
}

/// Bounds on the rejection-sampling loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingConfig {
    /// Candidate pinholes drawn per ring before giving up.
    pub max_attempts_per_ring: u64,
    /// Seed for reproducible layouts. `None` draws from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Behaviour when a ring exhausts its attempt budget.
    #[serde(default)]
    pub on_exhaustion: ExhaustionPolicy,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            max_attempts_per_ring: 1_000_000,
            seed: None,
            on_exhaustion: ExhaustionPolicy::Abort,
        }
    }
}

impl PackingConfig {
    /// Rejects a zero attempt budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts_per_ring == 0 {
            return Err(ConfigError::InvalidAttemptBudget);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid wavelength {0} mm (must be positive and finite)")]
    InvalidWavelength(f64),
    #[error("invalid focal distance {0} mm (must be positive and finite)")]
    InvalidFocalDistance(f64),
    #[error("invalid zone count (must be at least 1)")]
    InvalidZoneCount,
    #[error("invalid minimum feature size {0} mm (must be positive and finite)")]
    InvalidMinFeature(f64),
    #[error("invalid minimum spacing {0} mm (must be non-negative and finite)")]
    InvalidMinSpacing(f64),
    #[error("invalid max factor {0} (must be positive and finite)")]
    InvalidMaxFactor(f64),
    #[error("invalid area proportion {0} (must be in (0, 1])")]
    InvalidAreaProportion(f64),
    #[error("invalid attempt budget (must be at least 1)")]
    InvalidAttemptBudget,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert!(OpticsConfig::default().validate().is_ok());
        assert!(FabricationConfig::default().validate().is_ok());
        assert!(PackingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_non_positive_optics_rejected() {
        let mut optics = OpticsConfig::default();
        optics.wavelength_mm = 0.0;
        assert!(matches!(
            optics.validate(),
            Err(ConfigError::InvalidWavelength(_))
        ));

        let mut optics = OpticsConfig::default();
        optics.focal_distance_mm = -72.0;
        assert!(matches!(
            optics.validate(),
            Err(ConfigError::InvalidFocalDistance(_))
        ));

        let mut optics = OpticsConfig::default();
        optics.zones = 0;
        assert_eq!(optics.validate(), Err(ConfigError::InvalidZoneCount));
    }

    #[test]
    fn test_nan_wavelength_rejected() {
        let optics = OpticsConfig {
            wavelength_mm: f64::NAN,
            ..Default::default()
        };
        assert!(optics.validate().is_err());
    }

    #[test]
    fn test_area_prop_bounds() {
        let mut fab = FabricationConfig::default();
        fab.area_prop = 1.0;
        assert!(fab.validate().is_ok());

        fab.area_prop = 1.5;
        assert!(matches!(
            fab.validate(),
            Err(ConfigError::InvalidAreaProportion(_))
        ));

        fab.area_prop = 0.0;
        assert!(fab.validate().is_err());
    }

    #[test]
    fn test_zero_spacing_allowed() {
        let fab = FabricationConfig {
            min_spacing_mm: 0.0,
            ..Default::default()
        };
        assert!(fab.validate().is_ok());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let packing = PackingConfig {
            max_attempts_per_ring: 0,
            ..Default::default()
        };
        assert_eq!(packing.validate(), Err(ConfigError::InvalidAttemptBudget));
    }
}
