//! Fresnel zone boundaries.

use crate::config::{ConfigError, OpticsConfig};

/// Radius of the `k`-th zone boundary (1-indexed) in millimeters.
#[inline]
pub fn zone_radius(wavelength_mm: f64, focal_distance_mm: f64, k: u32) -> f64 {
    (focal_distance_mm * wavelength_mm * f64::from(k)).sqrt()
}

/// Two adjacent zone boundaries that bound one physical ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZonePair {
    /// Even 1-based zone number of the outer boundary.
    pub zone: u32,
    /// Radius of the odd boundary `r_{zone-1}`.
    pub inner_radius: f64,
    /// Radius of the even boundary `r_{zone}`.
    pub outer_radius: f64,
}

/// Boundary radii of the underlying zone plate.
///
/// Computed once from the optical constants and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ZonePlate {
    wavelength_mm: f64,
    focal_distance_mm: f64,
    boundaries: Vec<f64>,
}

impl ZonePlate {
    /// Computes `zones` boundary radii after validating the optics.
    pub fn new(optics: &OpticsConfig) -> Result<Self, ConfigError> {
        optics.validate()?;

        let boundaries = (1..=optics.zones)
            .map(|k| zone_radius(optics.wavelength_mm, optics.focal_distance_mm, k))
            .collect();

        Ok(Self {
            wavelength_mm: optics.wavelength_mm,
            focal_distance_mm: optics.focal_distance_mm,
            boundaries,
        })
    }

    /// All boundary radii, strictly increasing.
    #[inline]
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Radius of boundary `k` (1-indexed).
    pub fn boundary(&self, k: u32) -> Option<f64> {
        let index = usize::try_from(k).ok()?.checked_sub(1)?;
        self.boundaries.get(index).copied()
    }

    /// Number of zone boundaries.
    #[inline]
    pub fn zone_count(&self) -> usize {
        self.boundaries.len()
    }

    /// Design wavelength in millimeters.
    #[inline]
    pub fn wavelength_mm(&self) -> f64 {
        self.wavelength_mm
    }

    /// Focal distance in millimeters.
    #[inline]
    pub fn focal_distance_mm(&self) -> f64 {
        self.focal_distance_mm
    }

    /// Pairs every even boundary with its predecessor.
    ///
    /// Only these annuli become rings; the odd-to-even gaps stay opaque.
    /// A trailing odd boundary has no partner and is ignored.
    pub fn ring_pairs(&self) -> impl Iterator<Item = ZonePair> + '_ {
        self.boundaries
            .chunks_exact(2)
            .zip((2u32..).step_by(2))
            .map(|(pair, zone)| ZonePair {
                zone,
                inner_radius: pair[0],
                outer_radius: pair[1],
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_optics() -> OpticsConfig {
        OpticsConfig {
            wavelength_mm: 0.0005125,
            focal_distance_mm: 72.0,
            zones: 31,
        }
    }

    #[test]
    fn test_boundaries_follow_formula() {
        let plate = ZonePlate::new(&reference_optics()).unwrap();
        assert_eq!(plate.zone_count(), 31);

        for (i, &r) in plate.boundaries().iter().enumerate() {
            let k = (i + 1) as f64;
            assert!((r - (72.0 * 0.0005125 * k).sqrt()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_boundaries_strictly_increasing() {
        let plate = ZonePlate::new(&reference_optics()).unwrap();
        assert!(plate.boundaries().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_reference_endpoints() {
        let plate = ZonePlate::new(&reference_optics()).unwrap();
        assert!((plate.boundary(1).unwrap() - 0.19209).abs() < 1e-4);
        assert!((plate.boundary(31).unwrap() - 1.06952).abs() < 1e-4);
        assert!(plate.boundary(0).is_none());
        assert!(plate.boundary(32).is_none());
    }

    #[test]
    fn test_fifteen_rings_for_31_zones() {
        let plate = ZonePlate::new(&reference_optics()).unwrap();
        let pairs: Vec<_> = plate.ring_pairs().collect();

        assert_eq!(pairs.len(), 15);
        let zones: Vec<u32> = pairs.iter().map(|p| p.zone).collect();
        assert_eq!(zones, (2..=30).step_by(2).collect::<Vec<_>>());

        let first = pairs[0];
        assert_eq!(first.inner_radius, plate.boundary(1).unwrap());
        assert_eq!(first.outer_radius, plate.boundary(2).unwrap());
        let last = pairs[14];
        assert_eq!(last.inner_radius, plate.boundary(29).unwrap());
        assert_eq!(last.outer_radius, plate.boundary(30).unwrap());
    }

    #[test]
    fn test_single_zone_has_no_rings() {
        let optics = OpticsConfig {
            zones: 1,
            ..reference_optics()
        };
        let plate = ZonePlate::new(&optics).unwrap();
        assert_eq!(plate.ring_pairs().count(), 0);
    }

    #[test]
    fn test_deterministic() {
        let a = ZonePlate::new(&reference_optics()).unwrap();
        let b = ZonePlate::new(&reference_optics()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_optics_rejected() {
        let optics = OpticsConfig {
            focal_distance_mm: 0.0,
            ..reference_optics()
        };
        assert!(matches!(
            ZonePlate::new(&optics),
            Err(ConfigError::InvalidFocalDistance(_))
        ));
    }
}
