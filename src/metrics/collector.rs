//! Metrics collection and registry.

use crate::sieve::Layout;
use prometheus::{Encoder, Gauge, GaugeVec, IntCounter, IntGauge, Opts, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Per-ring values exported with a `zone` label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RingSample {
    /// Zone number of the ring.
    pub zone: u32,
    /// Open area in square millimeters.
    pub open_area: f64,
    /// Pinholes accepted.
    pub pinholes: usize,
}

/// A snapshot of layout state for metrics update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    /// Rings in the sieve.
    pub rings: usize,
    /// Rings skipped after exhausting their attempt budget.
    pub skipped_rings: usize,
    /// Pinholes across all rings.
    pub total_pinholes: usize,
    /// Open area across all rings.
    pub total_open_area: f64,
    /// Effective f-number.
    pub f_number: f64,
    /// Candidates drawn across all filled rings.
    pub attempts: u64,
    /// Candidates rejected across all filled rings.
    pub rejections: u64,
    /// Per-ring values.
    pub per_ring: Vec<RingSample>,
}

impl MetricsSnapshot {
    /// Creates a snapshot from a finished layout.
    pub fn from_layout(layout: &Layout) -> Self {
        let sieve = &layout.sieve;
        let rings = sieve.rings();

        Self {
            rings: rings.len(),
            skipped_rings: layout.skipped.len(),
            total_pinholes: sieve.total_pinholes(),
            total_open_area: sieve.total_open_area(),
            f_number: sieve.f_number(),
            attempts: rings.iter().map(|r| r.stats().attempts).sum(),
            rejections: rings.iter().map(|r| r.stats().rejections).sum(),
            per_ring: rings
                .iter()
                .map(|r| RingSample {
                    zone: r.zone(),
                    open_area: r.open_area(),
                    pinholes: r.pinhole_count(),
                })
                .collect(),
        }
    }
}

/// Prometheus metrics registry for sieve layouts.
pub struct MetricsRegistry {
    registry: Registry,

    // Sieve totals
    rings: IntGauge,
    skipped_rings: IntGauge,
    total_pinholes: IntGauge,
    total_open_area: Gauge,
    f_number: Gauge,

    // Sampling
    attempts_total: IntCounter,
    rejections_total: IntCounter,

    // Per ring
    ring_open_area: GaugeVec,
    ring_pinholes: GaugeVec,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all layout metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let rings = IntGauge::new("photon_sieve_rings", "Number of filled rings")?;
        let skipped_rings = IntGauge::new(
            "photon_sieve_skipped_rings",
            "Number of rings skipped after exhausting their attempt budget",
        )?;
        let total_pinholes = IntGauge::new(
            "photon_sieve_total_pinholes",
            "Number of pinholes across all rings",
        )?;
        let total_open_area = Gauge::new(
            "photon_sieve_total_open_area_mm2",
            "Open area across all rings in square millimeters",
        )?;
        let f_number = Gauge::new(
            "photon_sieve_f_number",
            "Focal distance over equivalent aperture diameter",
        )?;

        let attempts_total = IntCounter::new(
            "photon_sieve_packing_attempts_total",
            "Candidate pinholes drawn",
        )?;
        let rejections_total = IntCounter::new(
            "photon_sieve_packing_rejections_total",
            "Candidate pinholes rejected for violating spacing",
        )?;

        let ring_open_area = GaugeVec::new(
            Opts::new(
                "photon_sieve_ring_open_area_mm2",
                "Open area of each ring in square millimeters",
            ),
            &["zone"],
        )?;
        let ring_pinholes = GaugeVec::new(
            Opts::new("photon_sieve_ring_pinholes", "Pinholes in each ring"),
            &["zone"],
        )?;

        registry.register(Box::new(rings.clone()))?;
        registry.register(Box::new(skipped_rings.clone()))?;
        registry.register(Box::new(total_pinholes.clone()))?;
        registry.register(Box::new(total_open_area.clone()))?;
        registry.register(Box::new(f_number.clone()))?;
        registry.register(Box::new(attempts_total.clone()))?;
        registry.register(Box::new(rejections_total.clone()))?;
        registry.register(Box::new(ring_open_area.clone()))?;
        registry.register(Box::new(ring_pinholes.clone()))?;

        Ok(Self {
            registry,
            rings,
            skipped_rings,
            total_pinholes,
            total_open_area,
            f_number,
            attempts_total,
            rejections_total,
            ring_open_area,
            ring_pinholes,
        })
    }

    /// Updates all metrics from a snapshot.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        self.rings.set(snapshot.rings as i64);
        self.skipped_rings.set(snapshot.skipped_rings as i64);
        self.total_pinholes.set(snapshot.total_pinholes as i64);
        self.total_open_area.set(snapshot.total_open_area);
        self.f_number.set(snapshot.f_number);

        // For counters, we need to increment by the difference
        let current_attempts = self.attempts_total.get();
        if snapshot.attempts > current_attempts {
            self.attempts_total.inc_by(snapshot.attempts - current_attempts);
        }
        let current_rejections = self.rejections_total.get();
        if snapshot.rejections > current_rejections {
            self.rejections_total
                .inc_by(snapshot.rejections - current_rejections);
        }

        for ring in &snapshot.per_ring {
            let zone = ring.zone.to_string();
            self.ring_open_area
                .with_label_values(&[zone.as_str()])
                .set(ring.open_area);
            self.ring_pinholes
                .with_label_values(&[zone.as_str()])
                .set(ring.pinholes as f64);
        }
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
