//! Photon Sieve Layout Library
//!
//! Computes the physical layout of a photon sieve: circular pinholes
//! arranged in concentric rings that approximate a Fresnel zone plate
//! for a target wavelength and focal distance. Each ring is filled with
//! non-overlapping pinholes until it reaches a target open-area fraction,
//! subject to minimum feature size and minimum spacing.
//!
//! # Architecture
//!
//! Data flows strictly downward:
//!
//! ```text
//! config → geometry → packing (per ring) → sieve (aggregation)
//!                                             ↓
//!                                 analysis / metrics / report
//! ```
//!
//! # Design Principles
//!
//! - **Bounded sampling**: every ring has an attempt budget; running out is
//!   reported as a value, never a hang
//! - **Ring-scoped collision checks**: pinholes are only checked against
//!   their own ring
//! - **Reproducible**: a fixed seed gives a bit-identical layout
//! - **Geometry only**: no diffraction or throughput modelling
//!
//! # Example
//!
//! ```no_run
//! use photon_sieve::{
//!     analysis::LayoutChecker,
//!     config::SieveConfig,
//!     sieve::SieveBuilder,
//! };
//!
//! let mut config = SieveConfig::default();
//! config.packing.seed = Some(42);
//!
//! let builder = SieveBuilder::new(config.clone()).unwrap();
//! let layout = builder.build().unwrap();
//!
//! println!(
//!     "{} pinholes, f/{:.1}",
//!     layout.sieve.total_pinholes(),
//!     layout.sieve.f_number()
//! );
//!
//! let violations = LayoutChecker::new(config.fabrication).check_sieve(&layout.sieve);
//! assert!(violations.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod geometry;
pub mod metrics;
pub mod packing;
pub mod sieve;

// Re-export commonly used types at crate root
pub use analysis::{LayoutChecker, LayoutStatistics, LayoutViolation};
pub use config::{ConfigError, ExhaustionPolicy, SieveConfig};
pub use geometry::ZonePlate;
pub use packing::{Pinhole, PinholePacker, Ring, SieveRng};
pub use sieve::{Layout, Sieve, SieveBuilder, SieveError, SieveReport};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
