//! Per-ring collision query.

use super::pinhole::Pinhole;
use crate::geometry::Point;

/// Accepted pinholes of one ring, queried for clearance violations.
///
/// Scoped to a single ring: rings are radially separated, so pinholes
/// are never checked against other rings. The query is a linear scan,
/// which is fine at per-ring counts in the hundreds.
#[derive(Debug, Clone)]
pub struct ConflictIndex {
    centerline_radius: f64,
    min_spacing: f64,
    placed: Vec<Pinhole>,
}

impl ConflictIndex {
    /// Creates an empty index for a ring of `centerline_radius`.
    pub fn new(centerline_radius: f64, min_spacing: f64) -> Self {
        Self {
            centerline_radius,
            min_spacing,
            placed: Vec::new(),
        }
    }

    /// Returns true if a candidate at `azimuth` comes within the minimum
    /// spacing of any accepted pinhole.
    pub fn has_conflict(&self, radius: f64, azimuth: f64) -> bool {
        self.first_conflict(radius, azimuth).is_some()
    }

    /// Returns the first accepted pinhole the candidate conflicts with.
    pub fn first_conflict(&self, radius: f64, azimuth: f64) -> Option<&Pinhole> {
        let center = Point::from_polar(self.centerline_radius, azimuth);
        self.placed
            .iter()
            .find(|p| violates_spacing(p.clearance_to(&center, radius), self.min_spacing))
    }

    /// Records an accepted pinhole.
    ///
    /// Callers check [`has_conflict`](Self::has_conflict) first.
    pub fn insert(&mut self, pinhole: Pinhole) {
        self.placed.push(pinhole);
    }

    /// Accepted pinholes in insertion order.
    #[inline]
    pub fn pinholes(&self) -> &[Pinhole] {
        &self.placed
    }

    /// Number of accepted pinholes.
    #[inline]
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    /// Returns true if nothing has been accepted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Centerline radius shared by every pinhole in the index.
    #[inline]
    pub fn centerline_radius(&self) -> f64 {
        self.centerline_radius
    }

    /// Consumes the index, yielding the accepted pinholes.
    pub fn into_pinholes(self) -> Vec<Pinhole> {
        self.placed
    }
}

/// A clearance at or below the minimum spacing is a conflict.
#[inline]
pub(crate) fn violates_spacing(clearance: f64, min_spacing: f64) -> bool {
    clearance <= min_spacing
}
