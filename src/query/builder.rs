//! Build typed specifications from `(field, operator, value)` string triples
//!
//! This is the entry point search UIs drive: three strings in, a compiled
//! [`Specification`] out. The field path is resolved against the entity
//! schema, the operator code is matched against the fixed vocabulary, and the
//! raw value is coerced to the resolved field's kind (unwrapped for optional
//! fields) before the expression is compiled. Everything fails fast; no
//! partially-built filter ever reaches a data source.

use crate::core::error::QueryError;
use crate::core::field::FieldValue;
use crate::core::schema::{FieldKind, Queryable, ResolvedPath};
use crate::query::expr::{CompareOp, FilterExpr, FilterOperator, StringMatchOp};
use crate::query::specification::Specification;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Build a specification from a field path, an operator code and a raw value.
///
/// Operator semantics:
/// - `bw`/`cn`/`ew`: begins-with/contains/ends-with; string fields only
/// - `gt`/`ge`/`lt`/`le`: ordering comparison; string, integer, float and
///   datetime fields
/// - `eq`/`ne`: equality; enum fields parse the value as a variant name,
///   uuid fields as a UUID, everything else by generic conversion
pub fn build_spec<T: Queryable>(
    field_path: &str,
    operator_code: &str,
    raw_value: &str,
) -> Result<Specification<T>, QueryError> {
    let operator = FilterOperator::parse(operator_code)?;
    let resolved = ResolvedPath::resolve::<T>(field_path)?.require_scalar()?;
    let kind = resolved.kind();

    let expr = match operator {
        FilterOperator::Bw => string_match(field_path, kind, StringMatchOp::StartsWith, raw_value)?,
        FilterOperator::Cn => string_match(field_path, kind, StringMatchOp::Contains, raw_value)?,
        FilterOperator::Ew => string_match(field_path, kind, StringMatchOp::EndsWith, raw_value)?,
        FilterOperator::Gt => ordering(field_path, kind, CompareOp::Gt, raw_value)?,
        FilterOperator::Ge => ordering(field_path, kind, CompareOp::Ge, raw_value)?,
        FilterOperator::Lt => ordering(field_path, kind, CompareOp::Lt, raw_value)?,
        FilterOperator::Le => ordering(field_path, kind, CompareOp::Le, raw_value)?,
        FilterOperator::Eq => equality(field_path, kind, CompareOp::Eq, raw_value)?,
        FilterOperator::Ne => equality(field_path, kind, CompareOp::Ne, raw_value)?,
    };

    Specification::from_expr(expr)
}

fn string_match(
    path: &str,
    kind: FieldKind,
    op: StringMatchOp,
    value: &str,
) -> Result<FilterExpr, QueryError> {
    if kind != FieldKind::String {
        return Err(QueryError::OperatorNotApplicable {
            operator: op.code(),
            path: path.to_string(),
            kind: kind.name(),
        });
    }
    Ok(FilterExpr::StringMatch {
        path: path.to_string(),
        op,
        value: value.to_string(),
    })
}

fn ordering(
    path: &str,
    kind: FieldKind,
    op: CompareOp,
    raw_value: &str,
) -> Result<FilterExpr, QueryError> {
    if !kind.is_orderable() {
        return Err(QueryError::OperatorNotApplicable {
            operator: op.code(),
            path: path.to_string(),
            kind: kind.name(),
        });
    }
    Ok(FilterExpr::Compare {
        path: path.to_string(),
        op,
        value: coerce(raw_value, kind, path)?,
    })
}

fn equality(
    path: &str,
    kind: FieldKind,
    op: CompareOp,
    raw_value: &str,
) -> Result<FilterExpr, QueryError> {
    Ok(FilterExpr::Compare {
        path: path.to_string(),
        op,
        value: coerce(raw_value, kind, path)?,
    })
}

/// Coerce a raw string to a field kind. For optional fields the kind is
/// already unwrapped; the constant itself is never null.
fn coerce(raw: &str, kind: FieldKind, path: &str) -> Result<FieldValue, QueryError> {
    match kind {
        FieldKind::String => Ok(FieldValue::String(raw.to_string())),
        FieldKind::Integer => raw
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|_| conversion(raw, "integer", path)),
        FieldKind::Float => raw
            .parse::<f64>()
            .map(FieldValue::Float)
            .map_err(|_| conversion(raw, "float", path)),
        FieldKind::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" => Ok(FieldValue::Boolean(true)),
            "false" => Ok(FieldValue::Boolean(false)),
            _ => Err(conversion(raw, "boolean", path)),
        },
        FieldKind::DateTime => DateTime::parse_from_rfc3339(raw)
            .map(|dt| FieldValue::DateTime(dt.with_timezone(&Utc)))
            .map_err(|_| conversion(raw, "datetime", path)),
        FieldKind::Uuid => Uuid::parse_str(raw)
            .map(FieldValue::Uuid)
            .map_err(|_| QueryError::InvalidUuid {
                value: raw.to_string(),
                path: path.to_string(),
            }),
        FieldKind::Enum(variants) => {
            if variants.iter().any(|v| *v == raw) {
                Ok(FieldValue::Enum(raw.to_string()))
            } else {
                Err(QueryError::EnumParse {
                    value: raw.to_string(),
                    path: path.to_string(),
                    allowed: variants,
                })
            }
        }
        FieldKind::Nested(_) => Err(QueryError::NotScalar {
            path: path.to_string(),
        }),
    }
}

fn conversion(raw: &str, target: &'static str, path: &str) -> QueryError {
    QueryError::ValueConversion {
        value: raw.to_string(),
        target,
        path: path.to_string(),
    }
}
