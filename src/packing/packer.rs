//! Rejection-sampling pinhole packer.
//!
//! Each iteration draws a radius uniformly from the ring's [`RadiusBounds`]
//! and an azimuth uniformly from `[0, 2π)`, discards the candidate if it
//! comes within the minimum spacing of an accepted pinhole, and accepts it
//! otherwise. The loop ends as soon as the open area reaches the target,
//! or when the attempt budget is spent.

use super::conflict::ConflictIndex;
use super::pinhole::Pinhole;
use super::ring::{is_positive_finite, GeometryError, PackingStats, Ring, RingGeometry};
use crate::config::FabricationConfig;
use rand::Rng;
use std::f64::consts::TAU;

/// Fraction of ring width used as a lower bound on pinhole radius.
pub const MIN_RADIUS_WIDTH_FRACTION: f64 = 0.25;

/// Inclusive range pinhole radii are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusBounds {
    /// `max(min_feature, 0.25·width)`.
    pub min: f64,
    /// `width·max_factor`.
    pub max: f64,
}

impl RadiusBounds {
    /// Computes the radius range for a ring.
    pub fn for_ring(
        geometry: &RingGeometry,
        fabrication: &FabricationConfig,
    ) -> Result<Self, GeometryError> {
        if !is_positive_finite(geometry.width) || !geometry.target_open_area.is_finite() {
            return Err(GeometryError::DegenerateRing {
                zone: geometry.zone,
                width: geometry.width,
            });
        }

        let min = fabrication
            .min_feature_mm
            .max(geometry.width * MIN_RADIUS_WIDTH_FRACTION);
        let max = geometry.width * fabrication.max_factor;

        if min > max {
            return Err(GeometryError::EmptyRadiusRange {
                zone: geometry.zone,
                min,
                max,
            });
        }

        Ok(Self { min, max })
    }

    /// Returns true if `radius` lies within the range.
    #[inline]
    pub fn contains(&self, radius: f64) -> bool {
        radius >= self.min && radius <= self.max
    }
}

/// A ring whose attempt budget ran out before it was filled.
#[derive(Debug, Clone, PartialEq)]
pub struct Exhaustion {
    /// Everything accepted before the budget ran out.
    pub partial: Ring,
    /// Attempts spent.
    pub attempts: u64,
}

impl Exhaustion {
    /// How far the partial ring got, as a fraction of its target.
    pub fn progress(&self) -> f64 {
        self.partial.open_area() / self.partial.target_open_area()
    }
}

/// Result of packing one ring.
#[derive(Debug, Clone, PartialEq)]
pub enum PackingOutcome {
    /// The ring reached its target open area.
    Filled(Ring),
    /// The attempt budget was spent first.
    Exhausted(Exhaustion),
}

impl PackingOutcome {
    /// The filled ring, if packing succeeded.
    pub fn filled(self) -> Option<Ring> {
        match self {
            PackingOutcome::Filled(ring) => Some(ring),
            PackingOutcome::Exhausted(_) => None,
        }
    }

    /// Returns true if the ring was filled.
    pub fn is_filled(&self) -> bool {
        matches!(self, PackingOutcome::Filled(_))
    }
}

/// Fills rings with non-overlapping pinholes.
#[derive(Debug, Clone)]
pub struct PinholePacker {
    fabrication: FabricationConfig,
    max_attempts: u64,
}

impl PinholePacker {
    /// Creates a packer with the given limits and per-ring attempt budget.
    pub fn new(fabrication: FabricationConfig, max_attempts: u64) -> Self {
        Self {
            fabrication,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Fabrication limits in use.
    pub fn fabrication(&self) -> &FabricationConfig {
        &self.fabrication
    }

    /// Per-ring attempt budget.
    pub fn max_attempts(&self) -> u64 {
        self.max_attempts
    }

    /// Packs one ring, drawing candidates from `rng`.
    pub fn pack<R: Rng>(
        &self,
        geometry: &RingGeometry,
        rng: &mut R,
    ) -> Result<PackingOutcome, GeometryError> {
        let bounds = RadiusBounds::for_ring(geometry, &self.fabrication)?;
        let mut index =
            ConflictIndex::new(geometry.centerline_radius, self.fabrication.min_spacing_mm);
        let mut open_area = 0.0;
        let mut stats = PackingStats::default();

        while open_area < geometry.target_open_area {
            if stats.attempts >= self.max_attempts {
                tracing::warn!(
                    zone = geometry.zone,
                    attempts = stats.attempts,
                    pinholes = index.len(),
                    open_area,
                    target = geometry.target_open_area,
                    "Ring packing exhausted its attempt budget"
                );
                let attempts = stats.attempts;
                let partial = Ring::new(*geometry, index.into_pinholes(), open_area, stats);
                return Ok(PackingOutcome::Exhausted(Exhaustion { partial, attempts }));
            }
            stats.attempts += 1;

            let radius = rng.gen_range(bounds.min..=bounds.max);
            let azimuth = rng.gen_range(0.0..TAU);

            if index.has_conflict(radius, azimuth) {
                stats.rejections += 1;
                continue;
            }

            let pinhole = Pinhole::new(radius, azimuth, geometry.centerline_radius);
            open_area += pinhole.area();
            index.insert(pinhole);

            tracing::trace!(
                zone = geometry.zone,
                radius,
                azimuth,
                open_area,
                "Pinhole accepted"
            );
        }

        Ok(PackingOutcome::Filled(Ring::new(
            *geometry,
            index.into_pinholes(),
            open_area,
            stats,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::SieveRng;

    fn packer() -> PinholePacker {
        PinholePacker::new(FabricationConfig::default(), 1_000_000)
    }

    fn narrow_ring() -> RingGeometry {
        RingGeometry::new(2, 1.0, 1.05, 0.40).unwrap()
    }

    #[test]
    fn test_bounds_for_narrow_ring() {
        let bounds = RadiusBounds::for_ring(&narrow_ring(), &FabricationConfig::default()).unwrap();
        // max(0.003, 0.05 * 0.25)
        assert!((bounds.min - 0.0125).abs() < 1e-12);
        assert!((bounds.max - 0.05 * 1.53).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_use_feature_floor_on_thin_rings() {
        let geometry = RingGeometry::new(2, 1.0, 1.004, 0.40).unwrap();
        let bounds = RadiusBounds::for_ring(&geometry, &FabricationConfig::default()).unwrap();
        assert_eq!(bounds.min, 0.003);
    }

    #[test]
    fn test_empty_radius_range() {
        let geometry = RingGeometry::new(8, 1.0, 1.001, 0.40).unwrap();
        // 0.003 floor exceeds 0.001 * 1.53
        assert!(matches!(
            RadiusBounds::for_ring(&geometry, &FabricationConfig::default()),
            Err(GeometryError::EmptyRadiusRange { zone: 8, .. })
        ));
    }

    #[test]
    fn test_narrow_ring_respects_radius_floor() {
        let geometry = narrow_ring();
        let mut rng = SieveRng::from_u64_seed(3);
        let ring = packer().pack(&geometry, &mut rng).unwrap().filled().unwrap();

        assert!(ring.pinhole_count() > 0);
        for pinhole in ring.pinholes() {
            assert!(pinhole.radius() >= 0.0125);
            assert!(pinhole.radius() <= 0.05 * 1.53);
        }
    }

    #[test]
    fn test_azimuth_independent_of_ring_radius() {
        // Centerline far above 1 mm: a radius-scaled draw would overrun TAU.
        let geometry = RingGeometry::new(2, 5.0, 5.02, 0.40).unwrap();
        let mut rng = SieveRng::from_u64_seed(9);
        let ring = packer().pack(&geometry, &mut rng).unwrap().filled().unwrap();

        assert!(ring.pinhole_count() > 10);
        for pinhole in ring.pinholes() {
            assert!(pinhole.azimuth() >= 0.0 && pinhole.azimuth() < TAU);
        }
    }

    #[test]
    fn test_filled_ring_reaches_target_with_bounded_overshoot() {
        let geometry = narrow_ring();
        let mut rng = SieveRng::from_u64_seed(11);
        let ring = packer().pack(&geometry, &mut rng).unwrap().filled().unwrap();

        let last = ring.pinholes().last().unwrap();
        assert!(ring.open_area() >= ring.target_open_area());
        assert!(ring.overshoot() < last.area() + 1e-12);

        let sum: f64 = ring.pinholes().iter().map(Pinhole::area).sum();
        assert!((sum - ring.open_area()).abs() < 1e-12);
        assert_eq!(ring.stats().accepted(), ring.pinhole_count() as u64);
    }

    #[test]
    fn test_accepted_pinholes_keep_clearance() {
        let geometry = narrow_ring();
        let mut rng = SieveRng::from_u64_seed(5);
        let ring = packer().pack(&geometry, &mut rng).unwrap().filled().unwrap();

        let pinholes = ring.pinholes();
        for (i, a) in pinholes.iter().enumerate() {
            for b in &pinholes[i + 1..] {
                assert!(a.clearance_to(&b.center(), b.radius()) > 0.003);
            }
        }
    }

    #[test]
    fn test_same_seed_same_ring() {
        let geometry = narrow_ring();
        let a = packer()
            .pack(&geometry, &mut SieveRng::from_u64_seed(99))
            .unwrap();
        let b = packer()
            .pack(&geometry, &mut SieveRng::from_u64_seed(99))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_exhaustion_returns_partial_ring() {
        // Spacing wider than the whole circumference: only one pinhole ever fits.
        let fabrication = FabricationConfig {
            min_spacing_mm: 10.0,
            ..FabricationConfig::default()
        };
        let packer = PinholePacker::new(fabrication, 500);
        let geometry = narrow_ring();

        let outcome = packer
            .pack(&geometry, &mut SieveRng::from_u64_seed(1))
            .unwrap();

        match outcome {
            PackingOutcome::Exhausted(exhaustion) => {
                assert_eq!(exhaustion.attempts, 500);
                assert_eq!(exhaustion.partial.pinhole_count(), 1);
                assert_eq!(exhaustion.partial.stats().rejections, 499);
                assert!(!exhaustion.partial.is_filled());
                assert!(exhaustion.progress() > 0.0 && exhaustion.progress() < 1.0);
            }
            PackingOutcome::Filled(_) => panic!("ring should not fill"),
        }
    }

    #[test]
    fn test_degenerate_geometry_rejected_before_sampling() {
        let geometry = RingGeometry {
            width: 0.0,
            ..narrow_ring()
        };
        let mut rng = SieveRng::from_u64_seed(0);
        assert!(matches!(
            packer().pack(&geometry, &mut rng),
            Err(GeometryError::DegenerateRing { zone: 2, .. })
        ));
        assert_eq!(rng.bytes_drawn(), 0);
    }

    #[test]
    fn test_infinite_width_rejected_before_sampling() {
        let geometry = RingGeometry {
            outer_radius: f64::INFINITY,
            width: f64::INFINITY,
            ring_area: f64::NAN,
            target_open_area: f64::NAN,
            ..narrow_ring()
        };
        let mut rng = SieveRng::from_u64_seed(0);
        assert!(matches!(
            packer().pack(&geometry, &mut rng),
            Err(GeometryError::DegenerateRing { zone: 2, .. })
        ));
        assert_eq!(rng.bytes_drawn(), 0);
    }
}
