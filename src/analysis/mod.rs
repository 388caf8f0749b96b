//! Layout verification and summary statistics.
//!
//! The checker re-derives every fabrication and area constraint from a
//! finished sieve and reports the first violation per ring. Statistics
//! summarize how the packing went. Neither feeds back into packing.

mod checks;
mod statistics;

pub use checks::{LayoutChecker, LayoutViolation};
pub use statistics::LayoutStatistics;
