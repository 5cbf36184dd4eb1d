//! Vendor Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    state::State,
    vendors::{errors::into_status_error, get::VendorResponse},
};

/// Vendor Index Handler
///
/// Returns live vendors, newest first.
#[endpoint(tags("vendors"), summary = "List Vendors")]
pub(crate) async fn handler(
    page: QueryParam<String, false>,
    per_page: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<PageResponse<VendorResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let vendors = state
        .app
        .vendors
        .list_vendors(page_request(page, per_page))
        .await
        .map_err(into_status_error)?;

    Ok(Json(vendors.into()))
}
