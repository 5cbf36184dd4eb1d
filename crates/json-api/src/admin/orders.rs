//! Admin Order Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Admin Order Index Handler
///
/// Returns every order across all buyers and stores, newest first.
#[endpoint(
    tags("admin"),
    summary = "List All Orders",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    page: QueryParam<String, false>,
    per_page: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<PageResponse<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_all_orders(page_request(page, per_page))
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}
