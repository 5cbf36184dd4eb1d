//! Store URL Availability Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State, stores::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AvailabilityResponse {
    pub url: String,

    /// Whether no live store uses the URL. Creation can still race.
    pub available: bool,
}

/// Store URL Availability Handler
#[endpoint(
    tags("stores"),
    summary = "Check Store URL Availability",
    responses(
        (status_code = StatusCode::OK, description = "Availability of the URL"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing url parameter"),
    ),
)]
pub(crate) async fn handler(
    url: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<AvailabilityResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let url = url
        .into_inner()
        .map(|url| url.trim().to_owned())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| StatusError::bad_request().brief("Query parameter \"url\" is required"))?;

    let available = state
        .app
        .stores
        .is_url_available(&url)
        .await
        .map_err(into_status_error)?;

    Ok(Json(AvailabilityResponse { url, available }))
}
