//! Current User Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::{users::records::UserRecord, vendors::records::VendorUuid};

use crate::{extensions::*, state::State, users::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,

    pub name: String,

    pub email: String,

    pub username: String,

    pub avatar_url: Option<String>,

    pub address: Option<String>,

    pub phone: Option<String>,

    pub is_admin: bool,

    /// The user's live vendor profile, if any
    pub vendor_uuid: Option<Uuid>,

    pub created_at: String,

    pub updated_at: String,
}

impl UserResponse {
    pub(crate) fn new(user: UserRecord, vendor: Option<VendorUuid>) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            name: user.name,
            email: user.email,
            username: user.username,
            avatar_url: user.avatar_url,
            address: user.address,
            phone: user.phone,
            is_admin: user.is_admin,
            vendor_uuid: vendor.map(Into::into),
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// Current User Handler
#[endpoint(
    tags("users"),
    summary = "Get Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The authenticated user"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.current_user_or_401()?;

    let user = state
        .app
        .users
        .get_user(caller.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(UserResponse::new(user, caller.vendor)))
}
