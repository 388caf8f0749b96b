//! Summary statistics over a finished sieve.
//!
//! Descriptive only: these numbers help tune fabrication limits and
//! attempt budgets, they do not judge the layout.

use crate::sieve::Sieve;

/// Aggregate packing statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutStatistics {
    /// Smallest pinhole radius in millimeters.
    pub min_radius: f64,
    /// Mean pinhole radius in millimeters.
    pub mean_radius: f64,
    /// Largest pinhole radius in millimeters.
    pub max_radius: f64,
    /// Mean of per-ring open area over annulus area.
    pub mean_fill_fraction: f64,
    /// Largest per-ring open area beyond target.
    pub max_overshoot: f64,
    /// Candidates drawn across all rings.
    pub total_attempts: u64,
    /// Candidates rejected across all rings.
    pub total_rejections: u64,
    /// Number of pinholes measured.
    pub sample_size: usize,
}

impl LayoutStatistics {
    /// Computes statistics over every ring of `sieve`.
    pub fn analyze(sieve: &Sieve) -> Self {
        let rings = sieve.rings();
        if rings.is_empty() {
            return Self::default();
        }

        let radii: Vec<f64> = rings
            .iter()
            .flat_map(|r| r.pinholes().iter().map(|p| p.radius()))
            .collect();

        let (min_radius, max_radius) = radii
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
                (lo.min(r), hi.max(r))
            });
        let mean_radius = if radii.is_empty() {
            0.0
        } else {
            radii.iter().sum::<f64>() / radii.len() as f64
        };

        let mean_fill_fraction =
            rings.iter().map(|r| r.fill_fraction()).sum::<f64>() / rings.len() as f64;
        let max_overshoot = rings
            .iter()
            .map(|r| r.overshoot())
            .fold(f64::NEG_INFINITY, f64::max);

        Self {
            min_radius: if radii.is_empty() { 0.0 } else { min_radius },
            mean_radius,
            max_radius: if radii.is_empty() { 0.0 } else { max_radius },
            mean_fill_fraction,
            max_overshoot,
            total_attempts: rings.iter().map(|r| r.stats().attempts).sum(),
            total_rejections: rings.iter().map(|r| r.stats().rejections).sum(),
            sample_size: radii.len(),
        }
    }

    /// Fraction of all candidates that were accepted.
    pub fn acceptance_rate(&self) -> f64 {
        if self.total_attempts == 0 {
            return 0.0;
        }
        (self.total_attempts - self.total_rejections) as f64 / self.total_attempts as f64
    }
}
