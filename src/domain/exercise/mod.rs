//! Exercise module - the read-only exercise library.

mod entity;

pub use entity::{Exercise, ExerciseLevel};
