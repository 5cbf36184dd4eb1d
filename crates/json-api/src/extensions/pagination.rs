//! Pagination query parsing and the paginated response envelope.

use salvo::oapi::{ToSchema, extract::QueryParam};
use serde::{Deserialize, Serialize};

use marketplace_app::pagination::{Page, PageRequest};

/// Build a page request from the `page` and `per_page` query parameters.
///
/// Values that are missing, non-numeric or below one fall back to the defaults.
pub(crate) fn page_request(
    page: QueryParam<String, false>,
    per_page: QueryParam<String, false>,
) -> PageRequest {
    let parse = |value: Option<String>| value.and_then(|value| value.trim().parse::<i64>().ok());

    PageRequest::new(parse(page.into_inner()), parse(per_page.into_inner()))
}

/// Paginated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PageResponse<T> {
    /// Items on this page
    pub data: Vec<T>,

    /// Total number of items across all pages
    pub total: u64,

    /// The current page, starting at 1
    pub page: u32,

    /// Maximum number of items per page
    pub per_page: u32,

    pub total_pages: u64,

    pub has_next: bool,

    pub has_previous: bool,
}

impl<R, T> From<Page<R>> for PageResponse<T>
where
    T: From<R>,
{
    fn from(page: Page<R>) -> Self {
        let total_pages = page.total_pages();
        let has_next = page.has_next();
        let has_previous = page.has_previous();

        Self {
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages,
            has_next,
            has_previous,
            data: page.items.into_iter().map(T::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_page_metadata() {
        let page = Page::new(vec![1_u8, 2], 12, PageRequest::new(Some(2), Some(5)));

        let response: PageResponse<u32> = page.into();

        assert_eq!(response.data, vec![1, 2]);
        assert_eq!(response.total, 12);
        assert_eq!(response.page, 2);
        assert_eq!(response.per_page, 5);
        assert_eq!(response.total_pages, 3);
        assert!(response.has_next, "page 2 of 3 should have a next page");
        assert!(response.has_previous, "page 2 should have a previous page");
    }
}
