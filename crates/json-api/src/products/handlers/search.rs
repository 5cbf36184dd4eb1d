//! Product Search Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Product Search Handler
///
/// Full-text search over product names and descriptions, most relevant first.
#[endpoint(
    tags("products"),
    summary = "Search Products",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing search text"),
    ),
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    page: QueryParam<String, false>,
    per_page: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<PageResponse<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let text = q
        .into_inner()
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| StatusError::bad_request().brief("Query parameter \"q\" is required"))?;

    let products = state
        .app
        .products
        .search_products(text, page_request(page, per_page))
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}
