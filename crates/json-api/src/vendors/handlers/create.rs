//! Create Vendor Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::vendors::{data::NewVendor, records::VendorUuid};

use crate::{
    extensions::*,
    state::State,
    vendors::{errors::into_status_error, get::VendorResponse},
};

/// Create Vendor Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateVendorRequest {
    /// Client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub display_name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<CreateVendorRequest> for NewVendor {
    fn from(request: CreateVendorRequest) -> Self {
        NewVendor {
            uuid: request.uuid.map_or_else(VendorUuid::new, VendorUuid::from_uuid),
            display_name: request.display_name,
            description: request.description,
            image_url: request.image_url,
        }
    }
}

/// Create Vendor Handler
///
/// Registers the caller as a vendor. The profile stays inactive until its first store.
#[endpoint(
    tags("vendors"),
    summary = "Create Vendor",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Vendor created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "User already has a vendor profile"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateVendorRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VendorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.current_user_or_401()?;

    let vendor = state
        .app
        .vendors
        .create_vendor(caller.user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/vendors/{}", vendor.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(vendor.into()))
}
