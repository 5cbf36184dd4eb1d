//! Update Vendor Handler

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

use marketplace_app::domain::vendors::data::VendorUpdate;

use crate::{
    extensions::*,
    state::State,
    vendors::{errors::into_status_error, get::VendorResponse},
};

/// Update Vendor Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateVendorRequest {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<UpdateVendorRequest> for VendorUpdate {
    fn from(request: UpdateVendorRequest) -> Self {
        VendorUpdate {
            display_name: request.display_name,
            description: request.description,
            image_url: request.image_url,
        }
    }
}

/// Update Vendor Handler
#[endpoint(
    tags("vendors"),
    summary = "Update Vendor",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Vendor updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Vendor is not owned by the caller"),
    ),
)]
pub(crate) async fn handler(
    vendor: PathParam<Uuid>,
    json: JsonBody<UpdateVendorRequest>,
    depot: &mut Depot,
) -> Result<Json<VendorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.current_user_or_401()?;

    let updated = state
        .app
        .vendors
        .update_vendor(caller.user, vendor.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use marketplace_app::domain::vendors::{VendorsServiceError, records::VendorRecord};

    use crate::test_helpers::{
        Mocks, TEST_USER_UUID, TEST_VENDOR_UUID, buyer, make_vendor, service,
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Some(buyer()), Router::with_path("vendors/{vendor}").put(handler))
    }

    fn url() -> String {
        format!("http://example.com/vendors/{TEST_VENDOR_UUID}")
    }

    #[tokio::test]
    async fn test_owner_renames_vendor() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .vendors
            .expect_update_vendor()
            .once()
            .withf(|user, vendor, update| {
                *user == TEST_USER_UUID
                    && *vendor == TEST_VENDOR_UUID
                    && update.display_name.as_deref() == Some("Renamed")
            })
            .return_once(|_, vendor, update| {
                Ok(VendorRecord {
                    display_name: update.display_name.unwrap_or_default(),
                    ..make_vendor(vendor)
                })
            });

        let body: VendorResponse = TestClient::put(url())
            .json(&json!({ "display_name": "Renamed" }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(body.display_name, "Renamed");

        Ok(())
    }

    #[tokio::test]
    async fn test_non_owner_update_returns_403() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .vendors
            .expect_update_vendor()
            .once()
            .return_once(|_, _, _| Err(VendorsServiceError::NotAuthorized));

        let res = TestClient::put(url())
            .json(&json!({ "display_name": "Renamed" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
