//! Area of focus domain module.
//!
//! An area of focus is a sub-goal category inside a pillar. Predefined
//! areas are shared by every user; user-created areas belong to their author.

mod aggregate;

pub use aggregate::{AreaOfFocus, AreaOfFocusType};
