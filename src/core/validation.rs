//! Entity validation hooks
//!
//! Entities that implement [`Validate`] can be saved through
//! [`Repository::save_validated`](crate::core::repository::Repository::save_validated),
//! which rejects invalid instances before anything is written. The helper
//! functions here cover the common field checks; [`FieldFormat`] handles
//! pattern-shaped ones.

use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::field::{FieldFormat, FieldValue};

/// Self-validation for entities.
pub trait Validate {
    /// Check the entity's current state, reporting every failing field.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Field must be a non-blank string
pub fn non_blank(field: &str, value: &str) -> Result<(), FieldValidationError> {
    if value.trim().is_empty() {
        Err(FieldValidationError {
            field: field.to_string(),
            message: "must not be blank".to_string(),
        })
    } else {
        Ok(())
    }
}

/// String length must be within range (inclusive)
pub fn length_between(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), FieldValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        Err(FieldValidationError {
            field: field.to_string(),
            message: format!("length must be between {} and {} (currently: {})", min, max, len),
        })
    } else {
        Ok(())
    }
}

/// Number must be positive
pub fn positive(field: &str, value: i64) -> Result<(), FieldValidationError> {
    if value <= 0 {
        Err(FieldValidationError {
            field: field.to_string(),
            message: format!("must be positive (value: {})", value),
        })
    } else {
        Ok(())
    }
}

/// Value must match a [`FieldFormat`]
pub fn matches_format(
    field: &str,
    value: &FieldValue,
    format: &FieldFormat,
) -> Result<(), FieldValidationError> {
    if format.validate(value) {
        Ok(())
    } else {
        Err(FieldValidationError {
            field: field.to_string(),
            message: format!("does not match the {:?} format", format),
        })
    }
}

/// Collect individual field checks into a single validation outcome.
///
/// Returns `Ok(())` when every check passed, otherwise a
/// [`ValidationError::FieldErrors`] carrying all failures.
pub fn check(results: impl IntoIterator<Item = Result<(), FieldValidationError>>) -> Result<(), ValidationError> {
    let errors: Vec<FieldValidationError> =
        results.into_iter().filter_map(Result::err).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::FieldErrors(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert!(non_blank("name", "Alice").is_ok());
        assert!(non_blank("name", "   ").is_err());
    }

    #[test]
    fn test_length_between() {
        assert!(length_between("name", "Alice", 1, 10).is_ok());
        assert!(length_between("name", "", 1, 10).is_err());
        assert!(length_between("name", "Alexandrina", 1, 10).is_err());
    }

    #[test]
    fn test_positive() {
        assert!(positive("age", 30).is_ok());
        assert!(positive("age", 0).is_err());
        assert!(positive("age", -1).is_err());
    }

    #[test]
    fn test_matches_format() {
        let value = FieldValue::String("user@example.com".into());
        assert!(matches_format("email", &value, &FieldFormat::Email).is_ok());

        let bad = FieldValue::String("not-an-email".into());
        assert!(matches_format("email", &bad, &FieldFormat::Email).is_err());
    }

    #[test]
    fn test_check_aggregates_failures() {
        let outcome = check([
            non_blank("name", ""),
            positive("age", -3),
            non_blank("status", "active"),
        ]);
        match outcome {
            Err(ValidationError::FieldErrors(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_check_all_pass() {
        assert!(check([non_blank("name", "x"), positive("age", 1)]).is_ok());
    }
}
