//! SortOrder value object (non-negative display position).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Position of a row among its siblings. Always >= 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct SortOrder(i32);

impl SortOrder {
    /// First position.
    pub const FIRST: Self = Self(0);

    /// Creates a SortOrder, returning error if negative.
    pub fn try_new(value: i32) -> Result<Self, ValidationError> {
        if value < 0 {
            return Err(ValidationError::out_of_range(
                "sort_order",
                0,
                i64::from(i32::MAX),
                i64::from(value),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the value as i32.
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Returns the position after this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Next free position after the largest of `existing`, or FIRST when empty.
    pub fn next_after<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = SortOrder>,
    {
        existing
            .into_iter()
            .max()
            .map(|max| max.next())
            .unwrap_or(Self::FIRST)
    }
}

impl TryFrom<i32> for SortOrder {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<SortOrder> for i32 {
    fn from(order: SortOrder) -> Self {
        order.0
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_accepts_zero_and_positive() {
        assert_eq!(SortOrder::try_new(0).unwrap(), SortOrder::FIRST);
        assert_eq!(SortOrder::try_new(7).unwrap().value(), 7);
    }

    #[test]
    fn try_new_rejects_negative() {
        let err = SortOrder::try_new(-1).unwrap_err();
        assert_eq!(err.field(), "sort_order");
    }

    #[test]
    fn next_after_empty_is_first() {
        assert_eq!(SortOrder::next_after(Vec::new()), SortOrder::FIRST);
    }

    #[test]
    fn next_after_uses_max_plus_one_not_count() {
        let existing = vec![
            SortOrder::try_new(0).unwrap(),
            SortOrder::try_new(5).unwrap(),
            SortOrder::try_new(2).unwrap(),
        ];
        assert_eq!(SortOrder::next_after(existing).value(), 6);
    }

    #[test]
    fn deserialization_rejects_negative() {
        assert!(serde_json::from_str::<SortOrder>("-3").is_err());
        assert_eq!(serde_json::from_str::<SortOrder>("3").unwrap().value(), 3);
    }
}
