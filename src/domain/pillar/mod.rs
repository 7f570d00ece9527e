//! Pillar domain module.
//!
//! Pillars are the five fixed life domains a season is organised around.
//! They are seeded by the system and never created by users.

mod aggregate;

pub use aggregate::{Pillar, PillarName, MAX_DISPLAY_NAME_LENGTH};
