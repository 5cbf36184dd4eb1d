//! Store Services Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    services::{errors::into_status_error, index::ServiceResponse},
    state::State,
};

/// Store Services Handler
///
/// Returns the live services of a store owned by the calling vendor.
#[endpoint(
    tags("services"),
    summary = "List Store Services",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Services of the store"),
        (status_code = StatusCode::FORBIDDEN, description = "Store is not owned by the caller"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<ServiceResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.current_vendor_or_403()?;

    let services = state
        .app
        .services
        .list_store_services(vendor, store.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(services.into_iter().map(Into::into).collect()))
}
