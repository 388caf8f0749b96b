//! Ring geometry and finished rings.

use super::pinhole::Pinhole;
use crate::geometry::ZonePair;
use serde::Serialize;
use std::f64::consts::PI;
use thiserror::Error;

/// Fatal precondition violations in ring geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("ring for zone {zone} has non-positive or non-finite width {width} mm")]
    DegenerateRing { zone: u32, width: f64 },
    #[error("ring for zone {zone} has empty pinhole radius range [{min}, {max}] mm")]
    EmptyRadiusRange { zone: u32, min: f64, max: f64 },
}

/// Geometry of one ring, derived from its two bounding zone radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingGeometry {
    /// Even 1-based zone number of the outer boundary.
    pub zone: u32,
    /// Inner boundary radius in millimeters.
    pub inner_radius: f64,
    /// Outer boundary radius in millimeters.
    pub outer_radius: f64,
    /// Radial width in millimeters.
    pub width: f64,
    /// Radius of the circle pinhole centers sit on.
    pub centerline_radius: f64,
    /// Annulus area in square millimeters.
    pub ring_area: f64,
    /// Open area to reach before the ring is considered filled.
    pub target_open_area: f64,
}

impl RingGeometry {
    /// Derives ring geometry from two zone radii and the fill fraction.
    pub fn new(
        zone: u32,
        inner_radius: f64,
        outer_radius: f64,
        area_prop: f64,
    ) -> Result<Self, GeometryError> {
        let width = outer_radius - inner_radius;
        if !is_positive_finite(width) {
            return Err(GeometryError::DegenerateRing { zone, width });
        }

        // Radii near f64::MAX square to infinity even when the width is finite.
        let ring_area = PI * outer_radius * outer_radius - PI * inner_radius * inner_radius;
        let target_open_area = area_prop * ring_area;
        if !is_positive_finite(ring_area) || !target_open_area.is_finite() {
            return Err(GeometryError::DegenerateRing { zone, width });
        }

        Ok(Self {
            zone,
            inner_radius,
            outer_radius,
            width,
            centerline_radius: inner_radius + width / 2.0,
            ring_area,
            target_open_area,
        })
    }

    /// Derives ring geometry from a zone pair.
    pub fn from_pair(pair: &ZonePair, area_prop: f64) -> Result<Self, GeometryError> {
        Self::new(pair.zone, pair.inner_radius, pair.outer_radius, area_prop)
    }
}

/// Rejects NaN, infinities, zero and negatives.
#[inline]
pub(crate) fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Sampling counters for one ring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PackingStats {
    /// Candidates drawn.
    pub attempts: u64,
    /// Candidates discarded for violating spacing.
    pub rejections: u64,
}

impl PackingStats {
    /// Candidates accepted.
    #[inline]
    pub fn accepted(&self) -> u64 {
        self.attempts - self.rejections
    }

    /// Fraction of candidates accepted; zero before any attempt.
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.accepted() as f64 / self.attempts as f64
    }
}

/// A packed ring.
///
/// Only the packer creates rings, and they are immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    geometry: RingGeometry,
    pinholes: Vec<Pinhole>,
    open_area: f64,
    stats: PackingStats,
}

impl Ring {
    pub(crate) fn new(
        geometry: RingGeometry,
        pinholes: Vec<Pinhole>,
        open_area: f64,
        stats: PackingStats,
    ) -> Self {
        Self {
            geometry,
            pinholes,
            open_area,
            stats,
        }
    }

    /// Even zone number identifying the ring.
    #[inline]
    pub fn zone(&self) -> u32 {
        self.geometry.zone
    }

    /// Full ring geometry.
    #[inline]
    pub fn geometry(&self) -> &RingGeometry {
        &self.geometry
    }

    /// Radius pinhole centers sit on.
    #[inline]
    pub fn centerline_radius(&self) -> f64 {
        self.geometry.centerline_radius
    }

    /// Radial width in millimeters.
    #[inline]
    pub fn width(&self) -> f64 {
        self.geometry.width
    }

    /// Open area the ring must reach.
    #[inline]
    pub fn target_open_area(&self) -> f64 {
        self.geometry.target_open_area
    }

    /// Accepted pinholes in acceptance order.
    #[inline]
    pub fn pinholes(&self) -> &[Pinhole] {
        &self.pinholes
    }

    /// Number of accepted pinholes.
    #[inline]
    pub fn pinhole_count(&self) -> usize {
        self.pinholes.len()
    }

    /// Sum of accepted pinhole areas.
    #[inline]
    pub fn open_area(&self) -> f64 {
        self.open_area
    }

    /// Sampling counters.
    #[inline]
    pub fn stats(&self) -> &PackingStats {
        &self.stats
    }

    /// Returns true once the open area has reached the target.
    pub fn is_filled(&self) -> bool {
        self.open_area >= self.geometry.target_open_area
    }

    /// Open area as a fraction of the annulus area.
    pub fn fill_fraction(&self) -> f64 {
        self.open_area / self.geometry.ring_area
    }

    /// Open area beyond the target (negative while under-filled).
    pub fn overshoot(&self) -> f64 {
        self.open_area - self.geometry.target_open_area
    }
}
