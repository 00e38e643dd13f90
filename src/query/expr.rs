//! Filter expressions and the string operator vocabulary
//!
//! [`FilterExpr`] is a type-erased expression tree: paths are strings, values
//! are [`FieldValue`]s, and composition is explicit `And`/`Or` nodes. A tree
//! says *what* to filter; lowering it to a typed predicate is the job of
//! [`Specification::from_expr`](crate::query::specification::Specification::from_expr),
//! which is also where path and operator validity are checked. Keeping the
//! tree around lets storage backends translate a filter into their own query
//! language instead of running the closure row by row.

use crate::core::error::QueryError;
use crate::core::field::FieldValue;

/// The fixed, case-insensitive operator codes accepted from string input.
///
/// This vocabulary is effectively a wire format for UI-driven filtering and
/// must stay stable: `eq, ne, bw, cn, ew, gt, ge, lt, le`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal
    Eq,
    /// Not equal
    Ne,
    /// Begins with (strings only)
    Bw,
    /// Contains (strings only)
    Cn,
    /// Ends with (strings only)
    Ew,
    /// Greater than
    Gt,
    /// Greater than or equal
    Ge,
    /// Less than
    Lt,
    /// Less than or equal
    Le,
}

impl FilterOperator {
    /// Parse an operator code, case-insensitively.
    pub fn parse(code: &str) -> Result<Self, QueryError> {
        match code.to_ascii_lowercase().as_str() {
            "eq" => Ok(Self::Eq),
            "ne" => Ok(Self::Ne),
            "bw" => Ok(Self::Bw),
            "cn" => Ok(Self::Cn),
            "ew" => Ok(Self::Ew),
            "gt" => Ok(Self::Gt),
            "ge" => Ok(Self::Ge),
            "lt" => Ok(Self::Lt),
            "le" => Ok(Self::Le),
            _ => Err(QueryError::UnsupportedOperator {
                code: code.to_string(),
            }),
        }
    }

    /// Canonical lowercase code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Bw => "bw",
            Self::Cn => "cn",
            Self::Ew => "ew",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
        }
    }
}

/// Comparison operators over scalar field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl CompareOp {
    /// Canonical lowercase code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
        }
    }

    /// Whether this is one of the ordering comparisons (`gt`/`ge`/`lt`/`le`)
    pub fn is_ordering(&self) -> bool {
        matches!(self, Self::Gt | Self::Ge | Self::Lt | Self::Le)
    }

    /// Evaluate the comparison against a field value read off an entity.
    ///
    /// A null left side satisfies only `ne`: an absent value equals nothing
    /// and is ordered against nothing.
    pub fn evaluate(&self, left: &FieldValue, right: &FieldValue) -> bool {
        if left.is_null() {
            return matches!(self, Self::Ne);
        }
        match self {
            Self::Eq => left == right,
            Self::Ne => left != right,
            Self::Gt => left.compare(right).is_gt(),
            Self::Ge => left.compare(right).is_ge(),
            Self::Lt => left.compare(right).is_lt(),
            Self::Le => left.compare(right).is_le(),
        }
    }
}

/// Substring matching operators over string field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringMatchOp {
    StartsWith,
    Contains,
    EndsWith,
}

impl StringMatchOp {
    /// Canonical operator code (`bw`/`cn`/`ew`)
    pub fn code(&self) -> &'static str {
        match self {
            Self::StartsWith => "bw",
            Self::Contains => "cn",
            Self::EndsWith => "ew",
        }
    }

    /// Evaluate the match; non-string and null values never match.
    pub fn evaluate(&self, left: &FieldValue, needle: &str) -> bool {
        let Some(text) = left.as_string() else {
            return false;
        };
        match self {
            Self::StartsWith => text.starts_with(needle),
            Self::Contains => text.contains(needle),
            Self::EndsWith => text.ends_with(needle),
        }
    }
}

/// A type-erased boolean filter over an entity type.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Compare a field against a constant
    Compare {
        path: String,
        op: CompareOp,
        value: FieldValue,
    },

    /// Substring-match a string field against a literal
    StringMatch {
        path: String,
        op: StringMatchOp,
        value: String,
    },

    /// Both sides must hold (short-circuit)
    And(Box<FilterExpr>, Box<FilterExpr>),

    /// Either side must hold (short-circuit)
    Or(Box<FilterExpr>, Box<FilterExpr>),
}

impl FilterExpr {
    /// Conjunction of two expressions
    pub fn and(self, other: FilterExpr) -> FilterExpr {
        FilterExpr::And(Box::new(self), Box::new(other))
    }

    /// Disjunction of two expressions
    pub fn or(self, other: FilterExpr) -> FilterExpr {
        FilterExpr::Or(Box::new(self), Box::new(other))
    }
}
