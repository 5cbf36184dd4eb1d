//! Update Store Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::stores::data::StoreUpdate;

use crate::{
    extensions::*,
    state::State,
    stores::{errors::into_status_error, get::StoreResponse},
};

/// Update Store Request
///
/// The URL, address and contact of a store are fixed once created.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateStoreRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

impl From<UpdateStoreRequest> for StoreUpdate {
    fn from(request: UpdateStoreRequest) -> Self {
        StoreUpdate {
            name: request.name,
            description: request.description,
            logo_url: request.logo_url,
        }
    }
}

/// Update Store Handler
#[endpoint(
    tags("stores"),
    summary = "Update Store",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Store updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Store is not owned by the caller"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    json: JsonBody<UpdateStoreRequest>,
    depot: &mut Depot,
) -> Result<Json<StoreResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.current_vendor_or_403()?;

    let updated = state
        .app
        .stores
        .update_store(vendor, store.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
