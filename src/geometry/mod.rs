//! Zone plate geometry.
//!
//! Computes the Fresnel zone boundary radii `r_k = sqrt(f·λ·k)` and pairs
//! them into the annuli that become physical rings.

mod point;
mod zone_plate;

pub use point::Point;
pub use zone_plate::{zone_radius, ZonePair, ZonePlate};
