//! Get Vendor Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::vendors::records::VendorRecord;

use crate::{extensions::*, state::State, vendors::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorResponse {
    pub uuid: Uuid,

    /// The owning user, absent once their account is removed
    pub user_uuid: Option<Uuid>,

    pub display_name: String,

    pub description: Option<String>,

    pub image_url: Option<String>,

    /// Whether the vendor has at least one live store
    pub is_active: bool,

    pub created_at: String,

    pub updated_at: String,
}

impl From<VendorRecord> for VendorResponse {
    fn from(vendor: VendorRecord) -> Self {
        VendorResponse {
            uuid: vendor.uuid.into(),
            user_uuid: vendor.user_uuid.map(Into::into),
            display_name: vendor.display_name,
            description: vendor.description,
            image_url: vendor.image_url,
            is_active: vendor.is_active,
            created_at: vendor.created_at.to_string(),
            updated_at: vendor.updated_at.to_string(),
        }
    }
}

/// Get Vendor Handler
#[endpoint(
    tags("vendors"),
    summary = "Get Vendor",
    responses(
        (status_code = StatusCode::OK, description = "Vendor found"),
        (status_code = StatusCode::NOT_FOUND, description = "Vendor not found"),
    ),
)]
pub(crate) async fn handler(
    vendor: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<VendorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let vendor = state
        .app
        .vendors
        .get_vendor(vendor.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(vendor.into()))
}
