//! Deferred query plans
//!
//! A [`Query`] records filter, sort, skip and take operations without running
//! any of them. The source is enumerated only by the two terminal operations,
//! [`materialize`](Query::materialize) and [`count`](Query::count); everything
//! before that is plan construction and stays cheap no matter how slow the
//! source is. Operations apply in the order they were chained.

use crate::core::error::QueryError;
use crate::core::schema::Queryable;
use crate::core::store::EntitySource;
use crate::query::sort::{SortDescriptor, SortPlan};
use crate::query::specification::Specification;
use std::sync::Arc;

enum QueryOp<T> {
    Filter(Specification<T>),
    Sort(SortPlan<T>),
    Skip(usize),
    Take(usize),
}

impl<T> Clone for QueryOp<T> {
    fn clone(&self) -> Self {
        match self {
            QueryOp::Filter(spec) => QueryOp::Filter(spec.clone()),
            QueryOp::Sort(plan) => QueryOp::Sort(plan.clone()),
            QueryOp::Skip(n) => QueryOp::Skip(*n),
            QueryOp::Take(n) => QueryOp::Take(*n),
        }
    }
}

/// A composable, not-yet-executed query over an entity source.
pub struct Query<T> {
    source: Arc<dyn EntitySource<T>>,
    ops: Vec<QueryOp<T>>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            ops: self.ops.clone(),
        }
    }
}

impl<T: Queryable> Query<T> {
    /// Start an empty plan over a source.
    pub fn over(source: Arc<dyn EntitySource<T>>) -> Self {
        Self {
            source,
            ops: Vec::new(),
        }
    }

    /// Start a plan over an in-memory row set.
    pub fn from_rows(rows: Vec<T>) -> Self
    where
        T: Clone + 'static,
    {
        Self::over(Arc::new(rows))
    }

    /// Narrow the plan by a specification.
    pub fn filter(mut self, spec: Specification<T>) -> Self {
        self.ops.push(QueryOp::Filter(spec));
        self
    }

    /// Order the plan by a parsed descriptor. Path resolution happens now;
    /// an empty descriptor leaves the plan unchanged.
    pub fn sort(mut self, descriptor: &SortDescriptor) -> Result<Self, QueryError> {
        if descriptor.is_empty() {
            return Ok(self);
        }
        let plan = descriptor.bind::<T>()?;
        self.ops.push(QueryOp::Sort(plan));
        Ok(self)
    }

    /// Order the plan by a descriptor string (see [`SortDescriptor::parse`]).
    pub fn sorted_by(self, descriptor: &str) -> Result<Self, QueryError> {
        self.sort(&SortDescriptor::parse(descriptor))
    }

    /// Drop the first `n` rows.
    pub fn skip(mut self, n: usize) -> Self {
        self.ops.push(QueryOp::Skip(n));
        self
    }

    /// Keep at most `n` rows.
    pub fn take(mut self, n: usize) -> Self {
        self.ops.push(QueryOp::Take(n));
        self
    }

    /// Execute the plan and return the resulting rows.
    ///
    /// This is the first point at which the source is enumerated.
    pub fn materialize(&self) -> Vec<T> {
        let mut rows = self.source.fetch_all();
        for op in &self.ops {
            match op {
                QueryOp::Filter(spec) => rows.retain(|row| spec.is_satisfied_by(row)),
                QueryOp::Sort(plan) => rows.sort_by(|a, b| plan.compare(a, b)),
                QueryOp::Skip(n) => {
                    let n = (*n).min(rows.len());
                    rows.drain(..n);
                }
                QueryOp::Take(n) => rows.truncate(*n),
            }
        }
        rows
    }

    /// Execute the plan and count the resulting rows without keeping them.
    ///
    /// A separate pass over the source; a page-truncated plan counts its
    /// window, so total counts must come from a plan without skip/take.
    pub fn count(&self) -> usize {
        let rows = self.source.fetch_all();
        let mut kept: Vec<&T> = rows.iter().collect();
        for op in &self.ops {
            match op {
                QueryOp::Filter(spec) => kept.retain(|row| spec.is_satisfied_by(row)),
                QueryOp::Sort(plan) => kept.sort_by(|a, b| plan.compare(a, b)),
                QueryOp::Skip(n) => {
                    let n = (*n).min(kept.len());
                    kept.drain(..n);
                }
                QueryOp::Take(n) => kept.truncate(*n),
            }
        }
        kept.len()
    }
}
