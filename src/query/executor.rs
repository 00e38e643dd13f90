//! Paged query execution
//!
//! [`read_page`] is the single place where a composed filter + sort + page
//! plan turns into rows: it applies the optional specification, the page's
//! sort descriptor and the skip/take window, materializes the page, and
//! counts the filtered set *before* the window was applied. Reusing the
//! truncated page's length as the total is the classic paging bug; the total
//! here always comes from a separate count of the unpaged plan.

use crate::core::error::QueryError;
use crate::core::page::{PageRequest, PagedResult};
use crate::core::schema::Queryable;
use crate::query::lazy::Query;
use crate::query::sort::SortDescriptor;
use crate::query::specification::Specification;
use tracing::debug;

/// Execute a query with an optional filter and an optional page window.
///
/// Without a page request the whole filtered set is returned unpaged
/// (`page_size` 0). With one, the result holds the requested window, the
/// window's page index (integer division) and the total count of the
/// filtered set.
pub fn read_page<T: Queryable>(
    query: Query<T>,
    filter: Option<&Specification<T>>,
    page: Option<&PageRequest>,
) -> Result<PagedResult<T>, QueryError> {
    let filtered = match filter {
        Some(spec) => query.filter(spec.clone()),
        None => query,
    };

    let Some(page) = page else {
        let records = filtered.materialize();
        debug!(total = records.len(), "materialized unpaged result");
        return Ok(PagedResult::unpaged(records));
    };

    page.validate()?;

    let sorter = SortDescriptor::parse(page.sorter.as_deref().unwrap_or(""));
    let records = filtered
        .clone()
        .sort(&sorter)?
        .skip(page.start_index)
        .take(page.page_length)
        .materialize();

    // Counted against the filtered-but-unpaged plan; the page window above
    // truncates and must not feed the total.
    let total_records = filtered.count();

    debug!(
        page_index = page.page_index(),
        page_size = page.page_length,
        total_records,
        returned = records.len(),
        "materialized paged result"
    );

    Ok(PagedResult {
        records,
        page_index: page.page_index(),
        page_size: page.page_length,
        total_records,
    })
}
