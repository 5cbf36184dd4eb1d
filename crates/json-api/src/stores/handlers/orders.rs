//! Store Orders Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Store Orders Handler
///
/// Returns the orders placed against a store owned by the calling vendor.
#[endpoint(
    tags("stores", "orders"),
    summary = "List Store Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders of the store"),
        (status_code = StatusCode::FORBIDDEN, description = "Store is not owned by the caller"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    page: QueryParam<String, false>,
    per_page: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<PageResponse<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.current_vendor_or_403()?;

    let orders = state
        .app
        .orders
        .list_store_orders(vendor, store.into_inner().into(), page_request(page, per_page))
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}
