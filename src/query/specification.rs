//! Specifications: reusable, composable boolean predicates over entities
//!
//! A [`Specification`] wraps a single-argument predicate once and is then
//! immutable: `and`/`or` always build a new specification, never touch the
//! operands, and both sides of a combination see the same entity reference.
//! Specifications built from a [`FilterExpr`] keep the expression tree so a
//! backend can inspect the filter instead of running the compiled closure.

use crate::core::error::QueryError;
use crate::core::schema::{FieldKind, Queryable, ResolvedPath};
use crate::query::builder::build_spec;
use crate::query::expr::FilterExpr;
use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::sync::Arc;

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A reusable boolean rule for an entity type.
pub struct Specification<T> {
    predicate: Predicate<T>,
    expr: Option<FilterExpr>,
}

impl<T> Clone for Specification<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            expr: self.expr.clone(),
        }
    }
}

impl<T> fmt::Debug for Specification<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("expr", &self.expr)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Specification<T> {
    /// Wrap a typed predicate.
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
            expr: None,
        }
    }

    /// Evaluate the predicate directly against an in-memory instance.
    pub fn is_satisfied_by(&self, entity: &T) -> bool {
        (self.predicate)(entity)
    }

    /// The expression tree this specification was compiled from, if any.
    /// Hand-written predicates have none.
    pub fn expr(&self) -> Option<&FilterExpr> {
        self.expr.as_ref()
    }

    /// Both this and `other` must hold, short-circuit, left first.
    pub fn and(&self, other: &Specification<T>) -> Specification<T> {
        let left = Arc::clone(&self.predicate);
        let right = Arc::clone(&other.predicate);
        Specification {
            predicate: Arc::new(move |entity: &T| left(entity) && right(entity)),
            expr: match (&self.expr, &other.expr) {
                (Some(l), Some(r)) => Some(l.clone().and(r.clone())),
                _ => None,
            },
        }
    }

    /// Either this or `other` must hold, short-circuit, left first.
    pub fn or(&self, other: &Specification<T>) -> Specification<T> {
        let left = Arc::clone(&self.predicate);
        let right = Arc::clone(&other.predicate);
        Specification {
            predicate: Arc::new(move |entity: &T| left(entity) || right(entity)),
            expr: match (&self.expr, &other.expr) {
                (Some(l), Some(r)) => Some(l.clone().or(r.clone())),
                _ => None,
            },
        }
    }
}

impl<T: Queryable + 'static> Specification<T> {
    /// Compile an expression tree into a typed specification.
    ///
    /// Paths are resolved and operator applicability checked here, before
    /// anything is enumerated; a malformed tree aborts the whole build.
    pub fn from_expr(expr: FilterExpr) -> Result<Self, QueryError> {
        let predicate = compile::<T>(&expr)?;
        Ok(Self {
            predicate,
            expr: Some(expr),
        })
    }

    /// Build a specification from a `(field, operator, value)` string triple.
    ///
    /// See [`build_spec`] for the operator vocabulary and coercion rules.
    pub fn parse(field_path: &str, operator_code: &str, raw_value: &str) -> Result<Self, QueryError> {
        build_spec::<T>(field_path, operator_code, raw_value)
    }
}

/// `spec_a & spec_b` — logical AND
impl<T: 'static> BitAnd for Specification<T> {
    type Output = Specification<T>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(&rhs)
    }
}

/// `spec_a | spec_b` — logical OR
impl<T> BitOr for Specification<T> {
    type Output = Specification<T>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(&rhs)
    }
}

fn compile<T: Queryable + 'static>(expr: &FilterExpr) -> Result<Predicate<T>, QueryError> {
    match expr {
        FilterExpr::Compare { path, op, value } => {
            let resolved = ResolvedPath::resolve::<T>(path)?.require_scalar()?;
            if op.is_ordering() && !resolved.kind().is_orderable() {
                return Err(QueryError::OperatorNotApplicable {
                    operator: op.code(),
                    path: path.clone(),
                    kind: resolved.kind().name(),
                });
            }
            let op = *op;
            let value = value.clone();
            Ok(Arc::new(move |entity: &T| {
                op.evaluate(&resolved.value_of(entity), &value)
            }))
        }
        FilterExpr::StringMatch { path, op, value } => {
            let resolved = ResolvedPath::resolve::<T>(path)?.require_scalar()?;
            if resolved.kind() != FieldKind::String {
                return Err(QueryError::OperatorNotApplicable {
                    operator: op.code(),
                    path: path.clone(),
                    kind: resolved.kind().name(),
                });
            }
            let op = *op;
            let value = value.clone();
            Ok(Arc::new(move |entity: &T| {
                op.evaluate(&resolved.value_of(entity), &value)
            }))
        }
        FilterExpr::And(left, right) => {
            let left = compile::<T>(left)?;
            let right = compile::<T>(right)?;
            Ok(Arc::new(move |entity: &T| left(entity) && right(entity)))
        }
        FilterExpr::Or(left, right) => {
            let left = compile::<T>(left)?;
            let right = compile::<T>(right)?;
            Ok(Arc::new(move |entity: &T| left(entity) || right(entity)))
        }
    }
}
