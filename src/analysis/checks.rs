//! Post-hoc verification of packing constraints.

use crate::config::FabricationConfig;
use crate::packing::{GeometryError, RadiusBounds, Ring};
use crate::sieve::{f_number, Sieve};

/// Relative tolerance for comparing recomputed totals.
const TOTALS_TOLERANCE: f64 = 1e-9;

/// A constraint a finished layout fails.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutViolation {
    #[error("zone {zone}: {source}")]
    Geometry {
        zone: u32,
        #[source]
        source: GeometryError,
    },

    #[error("zone {zone} pinhole {index}: radius {radius:.6} outside [{min:.6}, {max:.6}]")]
    RadiusOutOfBounds {
        zone: u32,
        index: usize,
        radius: f64,
        min: f64,
        max: f64,
    },

    #[error("zone {zone} pinholes {first} and {second}: clearance {clearance:.6} not above {min_spacing:.6}")]
    Spacing {
        zone: u32,
        first: usize,
        second: usize,
        clearance: f64,
        min_spacing: f64,
    },

    #[error("zone {zone}: open area {open_area:.6} below target {target:.6}")]
    UnderFilled {
        zone: u32,
        open_area: f64,
        target: f64,
    },

    #[error("zone {zone}: overshoot {overshoot:.6} not below last pinhole area {last_area:.6}")]
    Overshoot {
        zone: u32,
        overshoot: f64,
        last_area: f64,
    },

    #[error("zone {zone}: stored open area {stored:.6} differs from pinhole sum {summed:.6}")]
    RingAreaDrift { zone: u32, stored: f64, summed: f64 },

    #[error("sieve totals drifted: {field} stored {stored} but recomputed {recomputed}")]
    TotalsDrift {
        field: &'static str,
        stored: f64,
        recomputed: f64,
    },
}

/// Checks finished layouts against the fabrication limits.
#[derive(Debug, Clone)]
pub struct LayoutChecker {
    fabrication: FabricationConfig,
}

impl LayoutChecker {
    /// Creates a checker for the given limits.
    pub fn new(fabrication: FabricationConfig) -> Self {
        Self { fabrication }
    }

    /// Checks one ring, returning the first violation found.
    pub fn check_ring(&self, ring: &Ring) -> Result<(), LayoutViolation> {
        let zone = ring.zone();
        let pinholes = ring.pinholes();

        let bounds = RadiusBounds::for_ring(ring.geometry(), &self.fabrication)
            .map_err(|source| LayoutViolation::Geometry { zone, source })?;
        if let Some((index, p)) = pinholes
            .iter()
            .enumerate()
            .find(|(_, p)| !bounds.contains(p.radius()))
        {
            return Err(LayoutViolation::RadiusOutOfBounds {
                zone,
                index,
                radius: p.radius(),
                min: bounds.min,
                max: bounds.max,
            });
        }

        let min_spacing = self.fabrication.min_spacing_mm;
        for (first, a) in pinholes.iter().enumerate() {
            for (offset, b) in pinholes[first + 1..].iter().enumerate() {
                let clearance = a.clearance_to(&b.center(), b.radius());
                if clearance <= min_spacing {
                    return Err(LayoutViolation::Spacing {
                        zone,
                        first,
                        second: first + 1 + offset,
                        clearance,
                        min_spacing,
                    });
                }
            }
        }

        let summed: f64 = pinholes.iter().map(|p| p.area()).sum();
        if !approx_eq(summed, ring.open_area()) {
            return Err(LayoutViolation::RingAreaDrift {
                zone,
                stored: ring.open_area(),
                summed,
            });
        }

        if !ring.is_filled() {
            return Err(LayoutViolation::UnderFilled {
                zone,
                open_area: ring.open_area(),
                target: ring.target_open_area(),
            });
        }

        let last_area = pinholes.last().map_or(0.0, |p| p.area());
        let overshoot = ring.overshoot();
        if overshoot >= last_area && !approx_eq(overshoot, last_area) {
            return Err(LayoutViolation::Overshoot {
                zone,
                overshoot,
                last_area,
            });
        }

        Ok(())
    }

    /// Checks every ring and the sieve totals, collecting all violations.
    pub fn check_sieve(&self, sieve: &Sieve) -> Vec<LayoutViolation> {
        let mut violations: Vec<LayoutViolation> = sieve
            .rings()
            .iter()
            .filter_map(|ring| self.check_ring(ring).err())
            .collect();

        let area: f64 = sieve.rings().iter().map(Ring::open_area).sum();
        if !approx_eq(area, sieve.total_open_area()) {
            violations.push(LayoutViolation::TotalsDrift {
                field: "total_open_area",
                stored: sieve.total_open_area(),
                recomputed: area,
            });
        }

        let count: usize = sieve.rings().iter().map(Ring::pinhole_count).sum();
        if count != sieve.total_pinholes() {
            violations.push(LayoutViolation::TotalsDrift {
                field: "total_pinholes",
                stored: sieve.total_pinholes() as f64,
                recomputed: count as f64,
            });
        }

        let f = f_number(sieve.focal_distance_mm(), area);
        if !(f.is_infinite() && sieve.f_number().is_infinite()) && !approx_eq(f, sieve.f_number())
        {
            violations.push(LayoutViolation::TotalsDrift {
                field: "f_number",
                stored: sieve.f_number(),
                recomputed: f,
            });
        }

        if violations.is_empty() {
            tracing::debug!(rings = sieve.rings().len(), "Layout verified");
        } else {
            tracing::warn!(count = violations.len(), "Layout verification failed");
        }

        violations
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOTALS_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}
