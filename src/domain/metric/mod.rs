//! Metric module - measurable quantities and their unit system.

mod aggregate;
pub mod unit;

pub use aggregate::{Metric, MetricDefinition, MetricType};
pub use unit::{DataType, Unit, UnitType};
