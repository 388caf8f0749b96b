//! Zone pair to packed ring.

use super::packer::{PackingOutcome, PinholePacker};
use super::ring::{GeometryError, RingGeometry};
use crate::geometry::ZonePair;
use rand::Rng;

/// Derives ring geometry from a zone pair and drives the packer over it.
///
/// Every ring gets a fresh conflict index; nothing carries over between
/// rings except the random stream.
#[derive(Debug, Clone)]
pub struct RingBuilder {
    packer: PinholePacker,
}

impl RingBuilder {
    /// Wraps a packer.
    pub fn new(packer: PinholePacker) -> Self {
        Self { packer }
    }

    /// The packer used for every ring.
    pub fn packer(&self) -> &PinholePacker {
        &self.packer
    }

    /// Builds the ring bounded by `pair`.
    pub fn build<R: Rng>(
        &self,
        pair: &ZonePair,
        rng: &mut R,
    ) -> Result<PackingOutcome, GeometryError> {
        let geometry = RingGeometry::from_pair(pair, self.packer.fabrication().area_prop)?;

        tracing::debug!(
            zone = geometry.zone,
            centerline = geometry.centerline_radius,
            width = geometry.width,
            target = geometry.target_open_area,
            "Packing ring"
        );

        let outcome = self.packer.pack(&geometry, rng)?;

        if let PackingOutcome::Filled(ring) = &outcome {
            tracing::debug!(
                zone = ring.zone(),
                pinholes = ring.pinhole_count(),
                attempts = ring.stats().attempts,
                rejections = ring.stats().rejections,
                open_area = ring.open_area(),
                "Ring filled"
            );
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FabricationConfig, OpticsConfig};
    use crate::geometry::ZonePlate;
    use crate::packing::SieveRng;

    fn builder() -> RingBuilder {
        RingBuilder::new(PinholePacker::new(FabricationConfig::default(), 1_000_000))
    }

    #[test]
    fn test_builds_innermost_reference_ring() {
        let plate = ZonePlate::new(&OpticsConfig::default()).unwrap();
        let pair = plate.ring_pairs().next().unwrap();

        let ring = builder()
            .build(&pair, &mut SieveRng::from_u64_seed(1))
            .unwrap()
            .filled()
            .unwrap();

        assert_eq!(ring.zone(), 2);
        let width = pair.outer_radius - pair.inner_radius;
        assert!((ring.width() - width).abs() < 1e-12);
        assert!((ring.centerline_radius() - (pair.inner_radius + width / 2.0)).abs() < 1e-12);
        assert!(ring.is_filled());
    }

    #[test]
    fn test_malformed_pair_is_fatal() {
        let pair = ZonePair {
            zone: 4,
            inner_radius: 0.3,
            outer_radius: 0.2,
        };
        let result = builder().build(&pair, &mut SieveRng::from_u64_seed(1));
        assert!(matches!(
            result,
            Err(GeometryError::DegenerateRing { zone: 4, .. })
        ));
    }
}
