//! Page requests, paged results and pagination metadata

use crate::core::error::QueryError;
use serde::{Deserialize, Serialize};

/// One page of a larger result set: a start offset, a page length and an
/// optional sort descriptor.
///
/// # Example
/// ```rust,ignore
/// // Third page of 25, newest first, then by name
/// let page = PageRequest::new(50, 25).with_sorter("created_at DESC, name");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based offset of the first record to read
    pub start_index: usize,

    /// Number of records per page; must be positive
    pub page_length: usize,

    /// Sort descriptor applied before paging (see
    /// [`SortDescriptor`](crate::query::sort::SortDescriptor))
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorter: Option<String>,
}

impl PageRequest {
    /// Create a page request with no sorter
    pub fn new(start_index: usize, page_length: usize) -> Self {
        Self {
            start_index,
            page_length,
            sorter: None,
        }
    }

    /// Attach a sort descriptor
    pub fn with_sorter(mut self, sorter: impl Into<String>) -> Self {
        self.sorter = Some(sorter.into());
        self
    }

    /// Reject unusable page windows instead of clamping them.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.page_length == 0 {
            return Err(QueryError::InvalidPageRequest {
                start_index: self.start_index,
                page_length: self.page_length,
            });
        }
        Ok(())
    }

    /// Zero-based page index of the window this request describes
    pub fn page_index(&self) -> usize {
        self.start_index / self.page_length.max(1)
    }
}

/// A fully materialized page of records plus result-set totals.
///
/// `total_records` counts the whole filtered set, not the page; it is never
/// the length of `records` unless paging was disabled.
#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T> {
    /// The records of this page, in final order
    pub records: Vec<T>,

    /// Zero-based index of this page
    pub page_index: usize,

    /// Page length used; 0 when paging was disabled
    pub page_size: usize,

    /// Count of all matching records before paging
    pub total_records: usize,
}

impl<T> PagedResult<T> {
    /// Wrap an unpaged result set: every record, no page window.
    pub fn unpaged(records: Vec<T>) -> Self {
        let total_records = records.len();
        Self {
            records,
            page_index: 0,
            page_size: 0,
            total_records,
        }
    }

    /// Derive pagination metadata for this result
    pub fn meta(&self) -> PageMeta {
        PageMeta::new(self.page_index, self.page_size, self.total_records)
    }
}

/// Pagination metadata derived from a [`PagedResult`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// Zero-based index of the current page
    pub page_index: usize,

    /// Number of records per page; 0 when paging was disabled
    pub page_size: usize,

    /// Total number of records (after filters)
    pub total_records: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PageMeta {
    /// Create pagination metadata from calculation
    pub fn new(page_index: usize, page_size: usize, total_records: usize) -> Self {
        let total_pages = if page_size == 0 {
            usize::from(total_records > 0)
        } else {
            total_records.div_ceil(page_size)
        };

        Self {
            page_index,
            page_size,
            total_records,
            total_pages,
            has_next: page_index + 1 < total_pages,
            has_prev: page_index > 0 && page_size > 0,
        }
    }
}
