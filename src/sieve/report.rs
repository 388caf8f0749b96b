//! Serializable layout report.
//!
//! Flattens a [`Layout`] into plain records (totals, rings, pinholes with
//! derived area and center) for downstream writers. Rendered as TOML by
//! the CLI.

use super::builder::{Layout, RingShortfall};
use crate::config::{FabricationConfig, OpticsConfig, SieveConfig};
use crate::packing::{Pinhole, Ring};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Errors rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// One pinhole in the report.
#[derive(Debug, Clone, Serialize)]
pub struct PinholeReport {
    /// Pinhole radius in millimeters.
    pub radius_mm: f64,
    /// Angle around the ring in radians.
    pub azimuth_rad: f64,
    /// Open area in square millimeters.
    pub area_mm2: f64,
    /// Center x coordinate in millimeters.
    pub x_mm: f64,
    /// Center y coordinate in millimeters.
    pub y_mm: f64,
}

impl From<&Pinhole> for PinholeReport {
    fn from(pinhole: &Pinhole) -> Self {
        let center = pinhole.center();
        Self {
            radius_mm: pinhole.radius(),
            azimuth_rad: pinhole.azimuth(),
            area_mm2: pinhole.area(),
            x_mm: center.x,
            y_mm: center.y,
        }
    }
}

/// One ring in the report.
#[derive(Debug, Clone, Serialize)]
pub struct RingReport {
    /// Even zone number of the outer boundary.
    pub zone: u32,
    /// Radius pinhole centers sit on.
    pub centerline_radius_mm: f64,
    /// Radial width of the ring.
    pub width_mm: f64,
    /// Open area the ring had to reach.
    pub target_open_area_mm2: f64,
    /// Open area reached.
    pub open_area_mm2: f64,
    /// Pinholes accepted.
    pub pinhole_count: usize,
    /// Candidates drawn.
    pub attempts: u64,
    /// Candidates rejected for violating spacing.
    pub rejections: u64,
    /// Pinholes in acceptance order.
    pub pinholes: Vec<PinholeReport>,
}

impl From<&Ring> for RingReport {
    fn from(ring: &Ring) -> Self {
        Self {
            zone: ring.zone(),
            centerline_radius_mm: ring.centerline_radius(),
            width_mm: ring.width(),
            target_open_area_mm2: ring.target_open_area(),
            open_area_mm2: ring.open_area(),
            pinhole_count: ring.pinhole_count(),
            attempts: ring.stats().attempts,
            rejections: ring.stats().rejections,
            pinholes: ring.pinholes().iter().map(PinholeReport::from).collect(),
        }
    }
}

/// Complete description of a generated sieve.
///
/// Scalar fields come before nested tables so the TOML rendering keeps
/// the totals at the top of the document.
#[derive(Debug, Clone, Serialize)]
pub struct SieveReport {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Library version that produced the layout.
    pub version: String,
    /// Seed the layout was drawn from, if fixed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Hex BLAKE3 digest of the layout.
    pub fingerprint: String,
    /// Pinholes across all rings.
    pub total_pinholes: usize,
    /// Open area across all rings.
    pub total_open_area_mm2: f64,
    /// Diameter of a circle with the same open area.
    pub equivalent_aperture_mm: f64,
    /// Effective f-number.
    pub f_number: f64,
    /// Optical parameters used.
    pub optics: OpticsConfig,
    /// Fabrication limits used.
    pub fabrication: FabricationConfig,
    /// Filled rings in zone order.
    pub rings: Vec<RingReport>,
    /// Rings left out after exhausting their budget.
    pub skipped: Vec<RingShortfall>,
}

impl SieveReport {
    /// Builds a report for `layout` generated under `config`.
    pub fn new(layout: &Layout, config: &SieveConfig) -> Self {
        let sieve = &layout.sieve;
        Self {
            generated_at: Utc::now(),
            version: crate::VERSION.to_string(),
            seed: config.packing.seed,
            fingerprint: sieve.fingerprint().to_hex().to_string(),
            total_pinholes: sieve.total_pinholes(),
            total_open_area_mm2: sieve.total_open_area(),
            equivalent_aperture_mm: sieve.equivalent_aperture_mm(),
            f_number: sieve.f_number(),
            optics: config.optics.clone(),
            fabrication: config.fabrication.clone(),
            rings: sieve.rings().iter().map(RingReport::from).collect(),
            skipped: layout.skipped.clone(),
        }
    }

    /// Renders the report as TOML.
    pub fn to_toml(&self) -> Result<String, ReportError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
