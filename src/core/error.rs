//! Typed error handling for the sift toolkit
//!
//! This module provides a typed error hierarchy so that callers can handle
//! failures specifically instead of matching on strings.
//!
//! # Error Categories
//!
//! - [`QueryError`]: Errors raised while building or executing dynamic
//!   queries (bad paths, operators, values, page requests)
//! - [`ValidationError`]: Errors related to entity validation
//! - [`StorageError`]: Errors related to storage backends
//! - [`ConfigError`]: Errors related to configuration parsing and validation
//!
//! # Example
//!
//! ```rust,ignore
//! use sift::prelude::*;
//!
//! match Specification::<User>::parse("age", "xx", "1") {
//!     Err(QueryError::UnsupportedOperator { code }) => {
//!         eprintln!("bad operator: {}", code);
//!     }
//!     other => { /* ... */ }
//! }
//! ```

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The operator codes accepted by the string predicate builder.
pub const OPERATOR_CODES: &str = "eq, ne, bw, cn, ew, gt, ge, lt, le";

/// The main error type for the sift toolkit
///
/// This enum encompasses all possible errors that can occur within the
/// toolkit. Each variant contains a more specific error type for that
/// category.
#[derive(Debug)]
pub enum SiftError {
    /// Dynamic query construction/execution errors
    Query(QueryError),

    /// Validation errors
    Validation(ValidationError),

    /// Storage backend errors
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal toolkit errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for SiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiftError::Query(e) => write!(f, "{}", e),
            SiftError::Validation(e) => write!(f, "{}", e),
            SiftError::Storage(e) => write!(f, "{}", e),
            SiftError::Config(e) => write!(f, "{}", e),
            SiftError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for SiftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SiftError::Query(e) => Some(e),
            SiftError::Validation(e) => Some(e),
            SiftError::Storage(e) => Some(e),
            SiftError::Config(e) => Some(e),
            SiftError::Internal(_) => None,
        }
    }
}

impl SiftError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SiftError::Query(e) => e.error_code(),
            SiftError::Validation(_) => "VALIDATION_ERROR",
            SiftError::Storage(e) => e.error_code(),
            SiftError::Config(_) => "CONFIG_ERROR",
            SiftError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors raised while building or executing dynamic queries.
///
/// All of these represent malformed caller input; none are retried or
/// recovered internally, and a failed build aborts the whole query before
/// anything is enumerated.
#[derive(Debug)]
pub enum QueryError {
    /// A segment of a dotted property path does not resolve
    PropertyNotFound {
        path: String,
        segment: String,
    },

    /// Operator code outside the fixed vocabulary
    UnsupportedOperator {
        code: String,
    },

    /// Operator is known but does not apply to the field's kind
    OperatorNotApplicable {
        operator: &'static str,
        path: String,
        kind: &'static str,
    },

    /// The supplied value cannot be coerced to the field's kind
    ValueConversion {
        value: String,
        target: &'static str,
        path: String,
    },

    /// The supplied value is not a variant of the field's enumeration
    EnumParse {
        value: String,
        path: String,
        allowed: &'static [&'static str],
    },

    /// The supplied value is not a well-formed UUID
    InvalidUuid {
        value: String,
        path: String,
    },

    /// The path resolves to a nested entity, not a comparable field
    NotScalar {
        path: String,
    },

    /// Pagination was requested with an unusable page window
    InvalidPageRequest {
        start_index: usize,
        page_length: usize,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::PropertyNotFound { path, segment } => {
                write!(
                    f,
                    "Property '{}' not found while resolving path '{}'",
                    segment, path
                )
            }
            QueryError::UnsupportedOperator { code } => {
                write!(
                    f,
                    "Operator '{}' not recognized. Use a correct parameter: {}",
                    code, OPERATOR_CODES
                )
            }
            QueryError::OperatorNotApplicable {
                operator,
                path,
                kind,
            } => {
                write!(
                    f,
                    "Operator '{}' does not apply to '{}' ({} field)",
                    operator, path, kind
                )
            }
            QueryError::ValueConversion {
                value,
                target,
                path,
            } => {
                write!(
                    f,
                    "Cannot convert '{}' to {} for field '{}'",
                    value, target, path
                )
            }
            QueryError::EnumParse {
                value,
                path,
                allowed,
            } => {
                write!(
                    f,
                    "'{}' is not a variant of '{}'; expected one of: {}",
                    value,
                    path,
                    allowed.join(", ")
                )
            }
            QueryError::InvalidUuid { value, path } => {
                write!(f, "'{}' is not a valid UUID for field '{}'", value, path)
            }
            QueryError::NotScalar { path } => {
                write!(
                    f,
                    "Field '{}' resolves to a nested entity and cannot be filtered or sorted directly",
                    path
                )
            }
            QueryError::InvalidPageRequest {
                start_index,
                page_length,
            } => {
                write!(
                    f,
                    "Invalid page request (start_index: {}, page_length: {}); page_length must be positive",
                    start_index, page_length
                )
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::PropertyNotFound { .. } => "PROPERTY_NOT_FOUND",
            QueryError::UnsupportedOperator { .. } => "UNSUPPORTED_OPERATOR",
            QueryError::OperatorNotApplicable { .. } => "OPERATOR_NOT_APPLICABLE",
            QueryError::ValueConversion { .. } => "VALUE_CONVERSION_FAILED",
            QueryError::EnumParse { .. } => "ENUM_PARSE_FAILED",
            QueryError::InvalidUuid { .. } => "INVALID_UUID",
            QueryError::NotScalar { .. } => "NOT_A_SCALAR_FIELD",
            QueryError::InvalidPageRequest { .. } => "INVALID_PAGE_REQUEST",
        }
    }
}

impl From<QueryError> for SiftError {
    fn from(err: QueryError) -> Self {
        SiftError::Query(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to entity validation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError {
        field: String,
        message: String,
    },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for SiftError {
    fn from(err: ValidationError) -> Self {
        SiftError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// Entity was not found
    NotFound {
        entity_type: String,
        id: Uuid,
    },

    /// A store lock was poisoned by a panicking writer
    LockPoisoned {
        operation: &'static str,
    },

    /// Backend-specific failure
    Backend {
        backend: String,
        message: String,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
            StorageError::LockPoisoned { operation } => {
                write!(f, "Store lock poisoned during {}", operation)
            }
            StorageError::Backend { backend, message } => {
                write!(f, "{} error: {}", backend, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::NotFound { .. } => "ENTITY_NOT_FOUND",
            StorageError::LockPoisoned { .. } => "LOCK_POISONED",
            StorageError::Backend { .. } => "STORAGE_ERROR",
        }
    }
}

impl From<StorageError> for SiftError {
    fn from(err: StorageError) -> Self {
        SiftError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    Parse {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    Io {
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::Io { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for SiftError {
    fn from(err: ConfigError) -> Self {
        SiftError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<std::io::Error> for SiftError {
    fn from(err: std::io::Error) -> Self {
        SiftError::Config(ConfigError::Io {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for SiftError {
    fn from(err: serde_yaml::Error) -> Self {
        SiftError::Config(ConfigError::Parse {
            file: None,
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for sift operations
pub type SiftResult<T> = Result<T, SiftError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_operator_lists_vocabulary() {
        let err = QueryError::UnsupportedOperator { code: "xx".into() };
        let msg = err.to_string();
        assert!(msg.contains("'xx'"));
        for code in ["eq", "ne", "bw", "cn", "ew", "gt", "ge", "lt", "le"] {
            assert!(msg.contains(code), "missing {code} in: {msg}");
        }
    }

    #[test]
    fn test_property_not_found_display() {
        let err = QueryError::PropertyNotFound {
            path: "address.street".into(),
            segment: "street".into(),
        };
        assert!(err.to_string().contains("street"));
        assert!(err.to_string().contains("address.street"));
    }

    #[test]
    fn test_enum_parse_lists_variants() {
        let err = QueryError::EnumParse {
            value: "Bogus".into(),
            path: "status".into(),
            allowed: &["Active", "Inactive"],
        };
        let msg = err.to_string();
        assert!(msg.contains("Active"));
        assert!(msg.contains("Inactive"));
    }

    #[test]
    fn test_validation_error_multiple_fields() {
        let err = ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "name".to_string(),
                message: "required".to_string(),
            },
            FieldValidationError {
                field: "email".to_string(),
                message: "invalid format".to_string(),
            },
        ]);
        let display = err.to_string();
        assert!(display.contains("name"));
        assert!(display.contains("email"));
    }

    #[test]
    fn test_sift_error_conversion() {
        let err: SiftError = QueryError::UnsupportedOperator { code: "zz".into() }.into();
        assert_eq!(err.error_code(), "UNSUPPORTED_OPERATOR");

        let err: SiftError = StorageError::NotFound {
            entity_type: "user".into(),
            id: Uuid::nil(),
        }
        .into();
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            field: "max_page_length".into(),
            value: "0".into(),
            message: "must be positive".into(),
        };
        assert!(err.to_string().contains("max_page_length"));
    }
}
