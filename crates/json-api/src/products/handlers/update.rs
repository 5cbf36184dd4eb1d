//! Update Product Handler

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

use marketplace_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Update Product Request
///
/// Omitted fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<u64>,
    pub currency: Option<String>,
    pub stock: Option<u32>,
    pub category: Option<String>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            description: request.description,
            image_url: request.image_url,
            price: request.price,
            currency: request.currency,
            stock: request.stock,
            category: request.category,
        }
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Store is not owned by the caller"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found in this store"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(store, product, json, depot),
    fields(
        vendor_uuid = tracing::field::Empty,
        store_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.current_vendor_or_403()?;
    let store = store.into_inner();
    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("vendor_uuid", tracing::field::display(vendor));
    span.record("store_uuid", tracing::field::display(store));
    span.record("product_uuid", tracing::field::display(product));

    let updated = state
        .app
        .products
        .update_product(vendor, store.into(), product.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(price = updated.price, stock = updated.stock, "updated product");

    Ok(Json(updated.into()))
}
