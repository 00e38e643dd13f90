//! Field value types and format validation

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::OnceLock;
use uuid::Uuid;

/// A polymorphic field value that can hold different runtime types.
///
/// Every field an entity exposes through its
/// [`Queryable`](crate::core::schema::Queryable) implementation is read as one
/// of these variants. `Null` stands for an absent optional field; `Enum` holds
/// the variant name of an [`Enumerated`](crate::core::schema::Enumerated)
/// field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Enum(String),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Name of the runtime type held by this value, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Uuid(_) => "uuid",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::Enum(_) => "enum",
            FieldValue::Null => "null",
        }
    }

    /// Total ordering over values of the same kind.
    ///
    /// `Null` sorts before any present value. Values of mismatched kinds
    /// compare equal; schema-consistent data never produces that case.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        use FieldValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Less,
            (_, Null) => Ordering::Greater,
            (String(a), String(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (Uuid(a), Uuid(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            (Enum(a), Enum(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Field format validators for automatic validation
#[derive(Debug, Clone)]
pub enum FieldFormat {
    Email,
    Uuid,
    Url,
    Phone,
    Custom(Regex),
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();

impl FieldFormat {
    /// Validate a field value against this format.
    ///
    /// Non-string values never match a format.
    pub fn validate(&self, value: &FieldValue) -> bool {
        let Some(text) = value.as_string() else {
            return false;
        };

        match self {
            FieldFormat::Email => EMAIL_REGEX
                .get_or_init(|| {
                    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
                })
                .is_match(text),
            FieldFormat::Uuid => Uuid::parse_str(text).is_ok(),
            FieldFormat::Url => URL_REGEX
                .get_or_init(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap())
                .is_match(text),
            // At least 8 digits, max 15 (E.164 standard)
            FieldFormat::Phone => PHONE_REGEX
                .get_or_init(|| Regex::new(r"^\+?[1-9]\d{7,14}$").unwrap())
                .is_match(text),
            FieldFormat::Custom(regex) => regex.is_match(text),
        }
    }
}
