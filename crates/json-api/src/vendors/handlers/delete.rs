//! Delete Vendor Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, vendors::errors::into_status_error};

/// Delete Vendor Handler
///
/// Soft-deletes the vendor together with its stores, products and services.
#[endpoint(
    tags("vendors"),
    summary = "Delete Vendor",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Vendor deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Vendor is not owned by the caller"),
    ),
)]
pub(crate) async fn handler(
    vendor: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.current_user_or_401()?;

    state
        .app
        .vendors
        .delete_vendor(caller.user, vendor.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
