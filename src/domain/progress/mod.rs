//! Progress module - time-series values logged against metrics.

mod aggregate;

pub use aggregate::{EntryType, Measurement, MetricProgressLog};
