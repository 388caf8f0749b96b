//! Physical and fabrication parameters.
//!
//! The optical constants fix the underlying zone plate; the fabrication
//! constants bound pinhole size and spacing; the packing constants bound
//! the rejection loop. All of them are validated before any geometry
//! is computed.

mod file;
mod params;

pub use file::SieveConfig;
pub use params::{ConfigError, ExhaustionPolicy, FabricationConfig, OpticsConfig, PackingConfig};
