//! Get Store Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::stores::records::{StoreDetails, StoreRecord};

use crate::{
    extensions::*, products::get::ProductResponse, services::index::ServiceResponse,
    state::State, stores::errors::into_status_error,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreResponse {
    pub uuid: Uuid,

    /// The vendor owning the store
    pub vendor_uuid: Uuid,

    pub name: String,

    pub description: Option<String>,

    pub logo_url: Option<String>,

    /// Unique public slug of the store
    pub url: String,

    pub address: String,

    /// E.164 phone number
    pub whatsapp_contact: String,

    pub created_at: String,

    pub updated_at: String,
}

impl From<StoreRecord> for StoreResponse {
    fn from(store: StoreRecord) -> Self {
        StoreResponse {
            uuid: store.uuid.into(),
            vendor_uuid: store.vendor_uuid.into(),
            name: store.name,
            description: store.description,
            logo_url: store.logo_url,
            url: store.url,
            address: store.address,
            whatsapp_contact: store.whatsapp_contact,
            created_at: store.created_at.to_string(),
            updated_at: store.updated_at.to_string(),
        }
    }
}

/// A store with its live catalog.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreDetailsResponse {
    pub store: StoreResponse,
    pub products: Vec<ProductResponse>,
    pub services: Vec<ServiceResponse>,
}

impl From<StoreDetails> for StoreDetailsResponse {
    fn from(details: StoreDetails) -> Self {
        StoreDetailsResponse {
            store: details.store.into(),
            products: details.products.into_iter().map(Into::into).collect(),
            services: details.services.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Store Handler
///
/// Returns a live store together with its live products and services.
#[endpoint(
    tags("stores"),
    summary = "Get Store",
    responses(
        (status_code = StatusCode::OK, description = "Store found"),
        (status_code = StatusCode::NOT_FOUND, description = "Store not found"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<StoreDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let details = state
        .app
        .stores
        .get_store(store.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(details.into()))
}
