//! Seasons - time-boxed goal tracking.
//!
//! A season groups the five life pillars; each pillar carries areas of focus,
//! each area carries metrics, and each metric may carry a goal and a series of
//! progress logs.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
