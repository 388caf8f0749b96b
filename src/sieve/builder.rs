//! End-to-end sieve construction.

use super::aggregate::{AggregationError, Sieve};
use crate::config::{ConfigError, ExhaustionPolicy, SieveConfig};
use crate::geometry::ZonePlate;
use crate::packing::{GeometryError, PackingOutcome, PinholePacker, RingBuilder, SieveRng};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

/// Errors that stop a sieve build.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SieveError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
    #[error("aggregation error: {0}")]
    Aggregation(#[from] AggregationError),
    #[error("ring for zone {zone} not filled after {attempts} attempts ({open_area} of {target_open_area} mm²)")]
    PackingNonTermination {
        zone: u32,
        attempts: u64,
        open_area: f64,
        target_open_area: f64,
    },
}

/// A ring left out of the sieve because it ran out of attempts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingShortfall {
    /// Zone of the skipped ring.
    pub zone: u32,
    /// Attempts spent.
    pub attempts: u64,
    /// Pinholes accepted before giving up.
    pub pinholes: usize,
    /// Open area reached.
    pub open_area: f64,
    /// Open area required.
    pub target_open_area: f64,
}

/// Output of a sieve build.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// The packed sieve.
    pub sieve: Sieve,
    /// Rings skipped under [`ExhaustionPolicy::Skip`].
    pub skipped: Vec<RingShortfall>,
}

/// Runs zone geometry, ring packing and aggregation in sequence.
#[derive(Debug, Clone)]
pub struct SieveBuilder {
    config: SieveConfig,
    plate: ZonePlate,
    rings: RingBuilder,
}

impl SieveBuilder {
    /// Validates the configuration and computes the zone plate.
    pub fn new(config: SieveConfig) -> Result<Self, SieveError> {
        config.validate()?;
        let plate = ZonePlate::new(&config.optics)?;
        let packer = PinholePacker::new(
            config.fabrication.clone(),
            config.packing.max_attempts_per_ring,
        );

        Ok(Self {
            config,
            plate,
            rings: RingBuilder::new(packer),
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    /// The underlying zone plate.
    pub fn zone_plate(&self) -> &ZonePlate {
        &self.plate
    }

    /// Builds a sieve using the configured seed, or OS entropy if none.
    pub fn build(&self) -> Result<Layout, SieveError> {
        let mut rng = SieveRng::from_optional_seed(self.config.packing.seed);
        self.build_with_rng(&mut rng)
    }

    /// Builds a sieve drawing every random value from `rng`.
    ///
    /// Rings are packed strictly in zone order from one sequential stream.
    pub fn build_with_rng<R: Rng>(&self, rng: &mut R) -> Result<Layout, SieveError> {
        let mut sieve = Sieve::new(self.plate.focal_distance_mm());
        let mut skipped = Vec::new();

        for pair in self.plate.ring_pairs() {
            match self.rings.build(&pair, rng)? {
                PackingOutcome::Filled(ring) => sieve.add_ring(ring)?,
                PackingOutcome::Exhausted(exhaustion) => {
                    let partial = &exhaustion.partial;
                    match self.config.packing.on_exhaustion {
                        ExhaustionPolicy::Abort => {
                            return Err(SieveError::PackingNonTermination {
                                zone: partial.zone(),
                                attempts: exhaustion.attempts,
                                open_area: partial.open_area(),
                                target_open_area: partial.target_open_area(),
                            });
                        }
                        ExhaustionPolicy::Skip => {
                            tracing::warn!(
                                zone = partial.zone(),
                                progress = exhaustion.progress(),
                                "Skipping ring that could not be filled"
                            );
                            skipped.push(RingShortfall {
                                zone: partial.zone(),
                                attempts: exhaustion.attempts,
                                pinholes: partial.pinhole_count(),
                                open_area: partial.open_area(),
                                target_open_area: partial.target_open_area(),
                            });
                        }
                    }
                }
            }
        }

        tracing::info!(
            rings = sieve.rings().len(),
            skipped = skipped.len(),
            pinholes = sieve.total_pinholes(),
            open_area = sieve.total_open_area(),
            f_number = sieve.f_number(),
            "Sieve layout complete"
        );

        Ok(Layout { sieve, skipped })
    }
}
