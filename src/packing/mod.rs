//! Ring construction and pinhole packing.
//!
//! Each ring is filled independently by rejection sampling: candidate
//! pinholes are drawn at random, checked against the ring's own
//! [`ConflictIndex`], and accepted until the ring's open area reaches
//! its target.
//!
//! ```text
//! ZonePair → RingBuilder → PinholePacker ⇄ ConflictIndex → Ring
//! ```

mod builder;
mod conflict;
mod packer;
mod pinhole;
mod ring;
mod rng;

pub use builder::RingBuilder;
pub use conflict::ConflictIndex;
pub use packer::{
    Exhaustion, PackingOutcome, PinholePacker, RadiusBounds, MIN_RADIUS_WIDTH_FRACTION,
};
pub use pinhole::Pinhole;
pub use ring::{GeometryError, PackingStats, Ring, RingGeometry};
pub use rng::SieveRng;
