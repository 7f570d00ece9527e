//! Goal module - targets attached to metrics within a season.

mod aggregate;

pub use aggregate::{GoalValues, MetricGoal};
