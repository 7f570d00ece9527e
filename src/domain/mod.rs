//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, rules)
//! - `pillar` - The five system life domains
//! - `area_of_focus` - Sub-goal categories within a pillar
//! - `metric` - Measurable quantities and the unit conversion table
//! - `goal` - Metric goals and progress calculation
//! - `progress` - Time-series progress logs
//! - `season` - Season lifecycle and composition tree
//! - `exercise` - Read-only exercise library entries

pub mod area_of_focus;
pub mod exercise;
pub mod foundation;
pub mod goal;
pub mod metric;
pub mod pillar;
pub mod progress;
pub mod season;

#[cfg(test)]
mod proptests;
