//! Ownership trait for user-owned and system-owned resources.
//!
//! Seasons always have an owner. Areas of focus, metrics and progress logs
//! may be system-owned (predefined, app-calculated) in which case no user
//! may mutate them.
//!
//! # Example
//!
//! ```ignore
//! impl OwnedByUser for Season {
//!     fn owner_id(&self) -> Option<&UserId> {
//!         Some(&self.user_id)
//!     }
//! }
//!
//! season.check_ownership(&user_id)?;  // Err(Forbidden) if not owner
//! ```

use super::{DomainError, ErrorCode, UserId};

/// Trait for entities that may belong to a single user.
pub trait OwnedByUser {
    /// Returns the owning user, or `None` for system-owned entities.
    fn owner_id(&self) -> Option<&UserId>;

    /// Returns true if `user_id` owns this entity.
    ///
    /// System-owned entities belong to nobody.
    fn belongs_to_user(&self, user_id: &UserId) -> bool {
        self.owner_id() == Some(user_id)
    }

    /// Validates ownership, returning `Forbidden` if the user is not the owner.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.belongs_to_user(user_id) {
            return Ok(());
        }
        let err = match self.owner_id() {
            Some(owner) => DomainError::new(
                ErrorCode::Forbidden,
                "User does not own this resource",
            )
            .with_detail("owner_id", owner.to_string()),
            None => DomainError::new(
                ErrorCode::Forbidden,
                "System-owned resources cannot be modified by users",
            ),
        };
        Err(err.with_detail("requested_by", user_id.to_string()))
    }

    /// Checks ownership only when an acting user is supplied.
    ///
    /// `None` means a system operation, which is always allowed.
    fn check_acting_user(&self, acting_user: Option<&UserId>) -> Result<(), DomainError> {
        match acting_user {
            Some(user_id) => self.check_ownership(user_id),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResource {
        owner: Option<UserId>,
    }

    impl OwnedByUser for TestResource {
        fn owner_id(&self) -> Option<&UserId> {
            self.owner.as_ref()
        }
    }

    #[test]
    fn belongs_to_user_returns_true_for_owner() {
        let owner = UserId::new();
        let resource = TestResource { owner: Some(owner) };
        assert!(resource.belongs_to_user(&owner));
        assert!(resource.check_ownership(&owner).is_ok());
    }

    #[test]
    fn check_ownership_fails_for_non_owner() {
        let resource = TestResource {
            owner: Some(UserId::new()),
        };
        let other = UserId::new();

        let err = resource.check_ownership(&other).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert!(err.message.contains("does not own"));
        assert_eq!(err.details.get("requested_by"), Some(&other.to_string()));
    }

    #[test]
    fn system_owned_belongs_to_nobody() {
        let resource = TestResource { owner: None };
        let user = UserId::new();
        assert!(!resource.belongs_to_user(&user));
        let err = resource.check_ownership(&user).unwrap_err();
        assert!(err.message.contains("System-owned"));
    }

    #[test]
    fn check_acting_user_allows_system_operations() {
        let resource = TestResource { owner: None };
        assert!(resource.check_acting_user(None).is_ok());
        assert!(resource.check_acting_user(Some(&UserId::new())).is_err());
    }
}
