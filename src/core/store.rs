//! The enumeration boundary between query plans and row storage

/// Source of rows for a [`Query`](crate::query::lazy::Query) plan.
///
/// Implementations hand the plan a full row set; the plan calls `fetch_all`
/// only from its terminal operations (`materialize`, `count`), never while
/// filters, sorts or page windows are being composed. A paged execution
/// fetches twice: once for the page, once for the independent total count.
pub trait EntitySource<T>: Send + Sync {
    /// Produce the current row set
    fn fetch_all(&self) -> Vec<T>;
}

/// Plain vectors are sources; handy for tests and ad-hoc pipelines.
impl<T: Clone + Send + Sync> EntitySource<T> for Vec<T> {
    fn fetch_all(&self) -> Vec<T> {
        self.clone()
    }
}
