//! Exercise library adapter.

mod bundled;

pub use bundled::BundledExerciseRepository;
