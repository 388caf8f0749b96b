//! Sieve totals and effective f-number.

use crate::packing::Ring;
use std::f64::consts::PI;
use thiserror::Error;

/// Errors adding a ring to a sieve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    #[error("ring for zone {zone} added after zone {last_zone}; rings must be added once, in increasing zone order")]
    OutOfOrder { zone: u32, last_zone: u32 },
    #[error("ring for zone {zone} is not filled ({open_area} of {target_open_area} mm²)")]
    Unfilled {
        zone: u32,
        open_area: f64,
        target_open_area: f64,
    },
}

/// Effective f-number of a sieve with `total_open_area`.
///
/// The aperture diameter is that of a single circle with the same area.
/// An empty sieve has an infinite f-number.
#[inline]
pub fn f_number(focal_distance_mm: f64, total_open_area: f64) -> f64 {
    focal_distance_mm / (2.0 * (total_open_area / PI).sqrt())
}

/// A photon sieve: filled rings plus device totals.
///
/// Grows only through [`add_ring`](Self::add_ring); totals are updated
/// there and nowhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct Sieve {
    focal_distance_mm: f64,
    rings: Vec<Ring>,
    total_pinholes: usize,
    total_open_area: f64,
    f_number: f64,
}

impl Sieve {
    /// Creates an empty sieve.
    pub fn new(focal_distance_mm: f64) -> Self {
        Self {
            focal_distance_mm,
            rings: Vec::new(),
            total_pinholes: 0,
            total_open_area: 0.0,
            f_number: f_number(focal_distance_mm, 0.0),
        }
    }

    /// Appends a filled ring and updates the totals.
    ///
    /// Rejects rings that are not filled and rings whose zone does not
    /// exceed the last one added.
    pub fn add_ring(&mut self, ring: Ring) -> Result<(), AggregationError> {
        if let Some(last) = self.rings.last() {
            if ring.zone() <= last.zone() {
                return Err(AggregationError::OutOfOrder {
                    zone: ring.zone(),
                    last_zone: last.zone(),
                });
            }
        }
        if !ring.is_filled() {
            return Err(AggregationError::Unfilled {
                zone: ring.zone(),
                open_area: ring.open_area(),
                target_open_area: ring.target_open_area(),
            });
        }

        self.total_open_area += ring.open_area();
        self.total_pinholes += ring.pinhole_count();
        self.f_number = f_number(self.focal_distance_mm, self.total_open_area);
        self.rings.push(ring);
        Ok(())
    }

    /// Rings in zone order.
    #[inline]
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Pinholes across all rings.
    #[inline]
    pub fn total_pinholes(&self) -> usize {
        self.total_pinholes
    }

    /// Sum of all ring open areas in square millimeters.
    #[inline]
    pub fn total_open_area(&self) -> f64 {
        self.total_open_area
    }

    /// Focal distance over equivalent aperture diameter.
    #[inline]
    pub fn f_number(&self) -> f64 {
        self.f_number
    }

    /// Focal distance the sieve was designed for.
    #[inline]
    pub fn focal_distance_mm(&self) -> f64 {
        self.focal_distance_mm
    }

    /// Diameter of a circle with the sieve's total open area.
    pub fn equivalent_aperture_mm(&self) -> f64 {
        2.0 * (self.total_open_area / PI).sqrt()
    }

    /// BLAKE3 digest over every ring zone and pinhole radius/azimuth.
    ///
    /// Identical layouts give identical fingerprints bit for bit.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        for ring in &self.rings {
            hasher.update(&ring.zone().to_le_bytes());
            hasher.update(&(ring.pinhole_count() as u64).to_le_bytes());
            for pinhole in ring.pinholes() {
                hasher.update(&pinhole.radius().to_bits().to_le_bytes());
                hasher.update(&pinhole.azimuth().to_bits().to_le_bytes());
            }
        }
        hasher.finalize()
    }
}
