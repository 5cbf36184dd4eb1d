//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Product Index Handler
///
/// Returns live products, newest first.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    page: QueryParam<String, false>,
    per_page: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<PageResponse<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products(page_request(page, per_page))
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::{
        domain::products::{ProductsServiceError, records::ProductUuid},
        pagination::{Page, PageRequest},
    };

    use crate::test_helpers::{Mocks, make_product, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, None, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_uses_default_page() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_list_products()
            .once()
            .withf(|page| *page == PageRequest::default())
            .return_once(|page| Ok(Page::new(vec![], 0, page)));

        let response: PageResponse<ProductResponse> =
            TestClient::get("http://example.com/products")
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert!(response.data.is_empty());
        assert_eq!(response.page, 1);
        assert_eq!(response.per_page, 10);
        assert_eq!(response.total_pages, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_page_envelope() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_list_products()
            .once()
            .withf(|page| *page == PageRequest::new(Some(2), Some(10)))
            .return_once(|page| {
                let items = (0..10)
                    .map(|_| make_product(ProductUuid::new(), 100))
                    .collect();

                Ok(Page::new(items, 25, page))
            });

        let response: PageResponse<ProductResponse> =
            TestClient::get("http://example.com/products?page=2&per_page=10")
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(response.data.len(), 10);
        assert_eq!(response.total, 25);
        assert_eq!(response.total_pages, 3);
        assert!(response.has_next, "page 2 of 3 should have a next page");
        assert!(response.has_previous, "page 2 should have a previous page");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_invalid_paging_falls_back_to_defaults() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_list_products()
            .once()
            .withf(|page| *page == PageRequest::default())
            .return_once(|page| Ok(Page::new(vec![], 0, page)));

        let res = TestClient::get("http://example.com/products?page=0&per_page=abc")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
