//! Shared field rules used by entity constructors.

use super::ValidationError;

/// Maximum length for area, metric and season names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for free-form notes.
pub const MAX_NOTES_LENGTH: usize = 500;

/// Maximum length for calculation methods and source references.
pub const MAX_REFERENCE_LENGTH: usize = 200;

/// Names that user-facing entities may not take (case-insensitive).
pub const RESERVED_NAMES: [&str; 3] = ["system", "admin", "default"];

/// Validates a required text field: non-blank and at most `max` characters.
pub fn require_text(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::too_long(field, max, len));
    }
    Ok(())
}

/// Validates a user-facing name: required, bounded, and not reserved.
pub fn require_name(field: &str, value: &str) -> Result<(), ValidationError> {
    require_text(field, value, MAX_NAME_LENGTH)?;
    let lowered = value.trim().to_lowercase();
    if RESERVED_NAMES.contains(&lowered.as_str()) {
        return Err(ValidationError::reserved(field, value.trim()));
    }
    Ok(())
}

/// Validates an optional text field's length.
pub fn limit_optional(field: &str, value: Option<&str>, max: usize) -> Result<(), ValidationError> {
    if let Some(v) = value {
        let len = v.chars().count();
        if len > max {
            return Err(ValidationError::too_long(field, max, len));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_name_accepts_ordinary_names() {
        assert!(require_name("name", "Strength").is_ok());
        assert!(require_name("name", &"x".repeat(MAX_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn require_name_rejects_blank() {
        assert!(matches!(
            require_name("name", "   "),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn require_name_rejects_too_long() {
        assert!(matches!(
            require_name("name", &"x".repeat(MAX_NAME_LENGTH + 1)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn require_name_rejects_reserved_in_any_case() {
        for name in ["system", "Admin", " DEFAULT "] {
            assert!(matches!(
                require_name("name", name),
                Err(ValidationError::Reserved { .. })
            ));
        }
    }

    #[test]
    fn length_is_counted_in_characters() {
        let accented = "é".repeat(MAX_NAME_LENGTH);
        assert!(require_name("name", &accented).is_ok());
    }

    #[test]
    fn limit_optional_ignores_none() {
        assert!(limit_optional("notes", None, 1).is_ok());
        assert!(limit_optional("notes", Some("ab"), 1).is_err());
    }
}
