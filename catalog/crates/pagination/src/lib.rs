//! Page-request and paged-envelope primitives shared by catalog read paths.
//!
//! A [`PageRequest`] carries validated paging parameters plus an optional
//! filter string; a [`PagedResult`] bundles one page of records with the
//! total count of records matching the same filter. Keeping both halves in
//! one crate ensures every read endpoint derives its SQL offset and limit
//! from the same arithmetic and echoes the request it answered.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page size must be at least one record per page.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    /// Page indices are one-based; zero would produce a negative offset.
    #[error("page index must be greater than zero")]
    ZeroPageIndex,
}

/// Validated paging parameters for a filtered, ordered read.
///
/// Page indices are one-based. Construction rejects a zero page size or page
/// index, so a negative SQL offset cannot be expressed by a value of this
/// type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page_size: u32,
    page_index: u32,
    query: Option<String>,
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPageSize`] or
    /// [`PageRequestError::ZeroPageIndex`] when the corresponding parameter
    /// is zero.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let page = PageRequest::new(10, 2, Some("chair".into())).expect("valid page");
    /// assert_eq!(page.offset(), 10);
    /// assert_eq!(page.limit(), 10);
    /// ```
    pub fn new(
        page_size: u32,
        page_index: u32,
        query: Option<String>,
    ) -> Result<Self, PageRequestError> {
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        if page_index == 0 {
            return Err(PageRequestError::ZeroPageIndex);
        }
        Ok(Self {
            page_size,
            page_index,
            query,
        })
    }

    /// Number of records per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// One-based page index.
    #[must_use]
    pub const fn page_index(&self) -> u32 {
        self.page_index
    }

    /// The filter string exactly as supplied, including an empty string.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The filter term that should constrain the result set.
    ///
    /// An absent or empty filter string means "match everything", so both
    /// normalise to `None` here while [`Self::query`] still echoes the raw
    /// input.
    #[must_use]
    pub fn filter_term(&self) -> Option<&str> {
        self.query.as_deref().filter(|term| !term.is_empty())
    }

    /// SQL offset for this page: `page_size * (page_index - 1)`.
    ///
    /// Widened to `i64` because that is what SQL backends bind. Construction
    /// guarantees the result is non-negative.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page_size as i64) * (self.page_index as i64 - 1)
    }

    /// SQL limit for this page.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.page_size as i64
    }
}

/// One page of records plus the total count matching the same filter.
///
/// `total_results` counts every record the request's filter matches,
/// independent of paging, so `total_results >= items.len()` always holds for
/// envelopes produced by a consistent read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// The records on this page, in the read's ordering.
    pub items: Vec<T>,
    /// Count of all records matching the filter, independent of paging.
    pub total_results: u64,
    /// One-based index of the page that was fetched.
    pub page_index: u32,
    /// Requested page size; `items` never exceeds it.
    pub page_size: u32,
    /// The filter string echoed from the originating request.
    pub query: Option<String>,
}

impl<T> PagedResult<T> {
    /// Assemble an envelope for a page answered against `request`.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PagedResult, PageRequest};
    ///
    /// let request = PageRequest::new(2, 1, None).expect("valid page");
    /// let page = PagedResult::from_page(&request, vec!["a", "b"], 5);
    /// assert_eq!(page.total_results, 5);
    /// assert_eq!(page.page_index, 1);
    /// ```
    #[must_use]
    pub fn from_page(request: &PageRequest, items: Vec<T>, total_results: u64) -> Self {
        Self {
            items,
            total_results,
            page_index: request.page_index(),
            page_size: request.page_size(),
            query: request.query().map(str::to_owned),
        }
    }
}
