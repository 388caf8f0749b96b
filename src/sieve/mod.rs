//! Whole-device aggregation.
//!
//! Rings are packed in increasing zone order and added to a [`Sieve`],
//! which keeps the device totals and effective f-number current after
//! every addition.

mod aggregate;
mod builder;
mod report;

pub use aggregate::{f_number, AggregationError, Sieve};
pub use builder::{Layout, RingShortfall, SieveBuilder, SieveError};
pub use report::{PinholeReport, ReportError, RingReport, SieveReport};
