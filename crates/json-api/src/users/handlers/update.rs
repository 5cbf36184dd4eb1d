//! Update Current User Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use marketplace_app::domain::users::data::UserProfileUpdate;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, me::UserResponse},
};

/// Update Profile Request
///
/// Email, username and avatar are owned by the identity provider.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateProfileRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl From<UpdateProfileRequest> for UserProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        UserProfileUpdate {
            name: request.name,
            address: request.address,
            phone: request.phone,
        }
    }
}

/// Update Current User Handler
#[endpoint(
    tags("users"),
    summary = "Update Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.current_user_or_401()?;

    let user = state
        .app
        .users
        .update_profile(caller.user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(UserResponse::new(user, caller.vendor)))
}
