//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use marketplace_app::domain::orders::{OrdersServiceError, records::OrderStatus};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Parse a status name, rejecting unknown values with a 400.
pub(crate) fn parse_status(status: &str) -> Result<OrderStatus, StatusError> {
    status
        .parse::<OrderStatus>()
        .map_err(|error| into_status_error(OrdersServiceError::from(error)))
}

/// Update Order Status Handler
///
/// Lets a buyer overwrite the status of one of their own orders.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    status: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.current_user_or_401()?;

    let status = parse_status(&status.into_inner())?;

    let order = state
        .app
        .orders
        .update_status(caller.user, order.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
