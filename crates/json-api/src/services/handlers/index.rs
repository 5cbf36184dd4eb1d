//! Service Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::services::records::ServiceRecord;

use crate::{extensions::*, services::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ServiceResponse {
    pub uuid: Uuid,

    /// The store offering the service
    pub store_uuid: Uuid,

    pub name: String,

    pub description: Option<String>,

    pub image_url: Option<String>,

    /// The rate in minor currency units
    pub rate: u64,

    pub currency: String,

    pub created_at: String,

    pub updated_at: String,
}

impl From<ServiceRecord> for ServiceResponse {
    fn from(service: ServiceRecord) -> Self {
        ServiceResponse {
            uuid: service.uuid.into(),
            store_uuid: service.store_uuid.into(),
            name: service.name,
            description: service.description,
            image_url: service.image_url,
            rate: service.rate,
            currency: service.currency,
            created_at: service.created_at.to_string(),
            updated_at: service.updated_at.to_string(),
        }
    }
}

/// Service Index Handler
///
/// Returns live services across all stores, newest first.
#[endpoint(tags("services"), summary = "List Services")]
pub(crate) async fn handler(
    page: QueryParam<String, false>,
    per_page: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<PageResponse<ServiceResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let services = state
        .app
        .services
        .list_services(page_request(page, per_page))
        .await
        .map_err(into_status_error)?;

    Ok(Json(services.into()))
}
