//! Dynamic sorting from textual descriptors
//!
//! Grammar: a comma-separated list of `<dotted.property.path>[ ASC| DESC]`
//! clauses, whitespace-trimmed, direction keyword case-insensitive, ascending
//! by default. The first clause is the primary order; every later clause only
//! breaks ties within groups already ordered by the earlier ones.
//!
//! Parsing is grammar-only and infallible; binding a descriptor to an entity
//! type resolves each path and is where unknown properties surface.

use crate::core::error::QueryError;
use crate::core::schema::{Queryable, ResolvedPath};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::marker::PhantomData;

/// Direction of one sort clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One `path [direction]` clause of a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortClause {
    pub path: String,
    pub direction: SortDirection,
}

/// An ordered sequence of sort clauses parsed from a textual descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortDescriptor {
    clauses: Vec<SortClause>,
}

impl SortDescriptor {
    /// Parse a descriptor string.
    ///
    /// A blank descriptor parses to an empty sequence, which sorts nothing.
    /// Clause text is only validated against an entity type by
    /// [`bind`](Self::bind).
    pub fn parse(descriptor: &str) -> Self {
        if descriptor.trim().is_empty() {
            return Self::default();
        }

        let clauses = descriptor
            .split(',')
            .map(|raw| {
                let clause = raw.trim();
                let upper = clause.to_ascii_uppercase();
                if upper.ends_with(" DESC") {
                    SortClause {
                        path: clause[..clause.len() - 5].trim_end().to_string(),
                        direction: SortDirection::Descending,
                    }
                } else if upper.ends_with(" ASC") {
                    SortClause {
                        path: clause[..clause.len() - 4].trim_end().to_string(),
                        direction: SortDirection::Ascending,
                    }
                } else {
                    SortClause {
                        path: clause.to_string(),
                        direction: SortDirection::Ascending,
                    }
                }
            })
            .collect();

        Self { clauses }
    }

    /// The parsed clauses, primary first
    pub fn clauses(&self) -> &[SortClause] {
        &self.clauses
    }

    /// Whether the descriptor sorts anything at all
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Resolve every clause against `T`'s schema into a comparator plan.
    pub fn bind<T: Queryable>(&self) -> Result<SortPlan<T>, QueryError> {
        let mut keys = Vec::with_capacity(self.clauses.len());
        for clause in &self.clauses {
            let resolved = ResolvedPath::resolve::<T>(&clause.path)?.require_scalar()?;
            keys.push((resolved, clause.direction));
        }
        Ok(SortPlan {
            keys,
            _entity: PhantomData,
        })
    }
}

/// A descriptor bound to an entity type: a chain of compiled key accessors.
///
/// `compare` implements the primary-then-tie-break semantics directly: the
/// first key with a non-equal outcome decides, so later keys can never
/// reorder groups formed by earlier ones. Used with a stable sort this also
/// keeps input order for fully tied rows.
#[derive(Debug)]
pub struct SortPlan<T> {
    keys: Vec<(ResolvedPath, SortDirection)>,
    _entity: PhantomData<fn(&T)>,
}

impl<T> Clone for SortPlan<T> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Queryable> SortPlan<T> {
    /// Compare two entities under this plan
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        for (path, direction) in &self.keys {
            let ordering = path.value_of(a).compare(&path.value_of(b));
            let ordering = match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queryable;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        a: i64,
        b: i64,
    }

    queryable!(Row, "row", {
        a: integer,
        b: integer,
    });

    #[test]
    fn test_parse_grammar() {
        let descriptor = SortDescriptor::parse("name, age DESC,  joined asc ");
        let clauses = descriptor.clauses();
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].path, "name");
        assert_eq!(clauses[0].direction, SortDirection::Ascending);
        assert_eq!(clauses[1].path, "age");
        assert_eq!(clauses[1].direction, SortDirection::Descending);
        assert_eq!(clauses[2].path, "joined");
        assert_eq!(clauses[2].direction, SortDirection::Ascending);
    }

    #[test]
    fn test_parse_trims_after_suffix_strip() {
        let descriptor = SortDescriptor::parse("name   desc");
        assert_eq!(descriptor.clauses()[0].path, "name");
        assert_eq!(descriptor.clauses()[0].direction, SortDirection::Descending);
    }

    #[test]
    fn test_parse_blank_is_empty() {
        assert!(SortDescriptor::parse("").is_empty());
        assert!(SortDescriptor::parse("   ").is_empty());
        assert!(!SortDescriptor::parse("a").is_empty());
    }

    #[test]
    fn test_bind_unknown_property() {
        let err = SortDescriptor::parse("nope").bind::<Row>().unwrap_err();
        assert!(matches!(err, QueryError::PropertyNotFound { .. }));

        // interior empty clauses are not silently dropped
        let err = SortDescriptor::parse("a,,b").bind::<Row>().unwrap_err();
        assert!(matches!(
            err,
            QueryError::PropertyNotFound { segment, .. } if segment.is_empty()
        ));
    }

    #[test]
    fn test_primary_and_tie_break() {
        let plan = SortDescriptor::parse("a, b desc").bind::<Row>().unwrap();

        let mut rows = vec![
            Row { a: 2, b: 0 },
            Row { a: 1, b: 1 },
            Row { a: 1, b: 2 },
        ];
        rows.sort_by(|x, y| plan.compare(x, y));

        assert_eq!(
            rows,
            vec![
                Row { a: 1, b: 2 },
                Row { a: 1, b: 1 },
                Row { a: 2, b: 0 },
            ]
        );
    }

    #[test]
    fn test_sort_is_idempotent() {
        let plan = SortDescriptor::parse("a, b desc").bind::<Row>().unwrap();

        let mut rows = vec![
            Row { a: 1, b: 2 },
            Row { a: 1, b: 1 },
            Row { a: 2, b: 0 },
        ];
        rows.sort_by(|x, y| plan.compare(x, y));
        let once = rows.clone();
        rows.sort_by(|x, y| plan.compare(x, y));
        assert_eq!(rows, once);
    }

    #[test]
    fn test_later_clause_never_overrides_earlier() {
        // b desc alone would invert the order; behind a it may only tie-break
        let plan = SortDescriptor::parse("a, b desc").bind::<Row>().unwrap();
        let low = Row { a: 1, b: 0 };
        let high = Row { a: 2, b: 9 };
        assert_eq!(plan.compare(&low, &high), Ordering::Less);
    }
}
