//! Delete Store Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, stores::errors::into_status_error};

/// Delete Store Handler
///
/// Soft-deletes the store with its catalog. The vendor goes inactive when
/// this was its last live store.
#[endpoint(
    tags("stores"),
    summary = "Delete Store",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Store deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Store is not owned by the caller"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.current_vendor_or_403()?;

    state
        .app
        .stores
        .delete_store(vendor, store.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
