//! Create Store Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::stores::{data::NewStore, records::StoreUuid};

use crate::{
    extensions::*,
    state::State,
    stores::{errors::into_status_error, get::StoreResponse},
};

/// Create Store Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateStoreRequest {
    /// Client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub logo_url: Option<String>,

    /// Public slug, unique among live stores
    pub url: String,

    pub address: String,

    /// E.164 phone number, e.g. +2348012345678
    pub whatsapp_contact: String,
}

impl From<CreateStoreRequest> for NewStore {
    fn from(request: CreateStoreRequest) -> Self {
        NewStore {
            uuid: request.uuid.map_or_else(StoreUuid::new, StoreUuid::from_uuid),
            name: request.name,
            description: request.description,
            logo_url: request.logo_url,
            url: request.url,
            address: request.address,
            whatsapp_contact: request.whatsapp_contact,
        }
    }
}

/// Create Store Handler
///
/// Opens a store for the calling vendor. The vendor becomes active.
#[endpoint(
    tags("stores"),
    summary = "Create Store",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Store created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "A vendor profile is required"),
        (status_code = StatusCode::CONFLICT, description = "Store URL is already taken"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateStoreRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<StoreResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.current_vendor_or_403()?;

    let store = state
        .app
        .stores
        .create_store(vendor, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/stores/{}", store.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(store.into()))
}
