//! Prometheus metrics for sieve layouts.
//!
//! A finished layout is summarized into a [`MetricsSnapshot`] and loaded
//! into a [`MetricsRegistry`], which renders the Prometheus text format.
//! The CLI writes that text to a file for node-exporter style collection.
//!
//! # Metrics Exposed
//!
//! ## Sieve Totals
//! - `photon_sieve_rings` - Filled rings
//! - `photon_sieve_skipped_rings` - Rings skipped after exhausting their budget
//! - `photon_sieve_total_pinholes` - Pinholes across all rings
//! - `photon_sieve_total_open_area_mm2` - Open area across all rings
//! - `photon_sieve_f_number` - Effective f-number
//!
//! ## Sampling
//! - `photon_sieve_packing_attempts_total` - Candidates drawn
//! - `photon_sieve_packing_rejections_total` - Candidates rejected
//!
//! ## Per Ring (label `zone`)
//! - `photon_sieve_ring_open_area_mm2`
//! - `photon_sieve_ring_pinholes`
//!
//! # Example
//!
//! ```no_run
//! use photon_sieve::{
//!     config::SieveConfig,
//!     metrics::{MetricsRegistry, MetricsSnapshot},
//!     sieve::SieveBuilder,
//! };
//!
//! let layout = SieveBuilder::new(SieveConfig::default())
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! registry.update(&MetricsSnapshot::from_layout(&layout));
//! println!("{}", registry.encode().unwrap());
//! ```

mod collector;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot, RingSample};
