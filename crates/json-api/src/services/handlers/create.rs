//! Create Service Handler

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

use marketplace_app::domain::{
    DEFAULT_CURRENCY,
    services::{data::NewService, records::ServiceUuid},
};

use crate::{
    extensions::*,
    services::{errors::into_status_error, index::ServiceResponse},
    state::State,
};

/// Create Service Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateServiceRequest {
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    /// Rate in minor currency units
    pub rate: u64,

    #[serde(default)]
    pub currency: Option<String>,
}

impl From<CreateServiceRequest> for NewService {
    fn from(request: CreateServiceRequest) -> Self {
        NewService {
            uuid: request.uuid.map_or_else(ServiceUuid::new, ServiceUuid::from_uuid),
            name: request.name,
            description: request.description,
            image_url: request.image_url,
            rate: request.rate,
            currency: request
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        }
    }
}

/// Create Service Handler
#[endpoint(
    tags("services"),
    summary = "Create Service",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Service created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Store is not owned by the caller"),
        (status_code = StatusCode::CONFLICT, description = "Service already exists"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    json: JsonBody<CreateServiceRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ServiceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.current_vendor_or_403()?;

    let service = state
        .app
        .services
        .create_service(vendor, store.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(service.into()))
}
