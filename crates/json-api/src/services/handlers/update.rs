//! Update Service Handler

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

use marketplace_app::domain::services::data::ServiceUpdate;

use crate::{
    extensions::*,
    services::{errors::into_status_error, index::ServiceResponse},
    state::State,
};

/// Update Service Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub rate: Option<u64>,
    pub currency: Option<String>,
}

impl From<UpdateServiceRequest> for ServiceUpdate {
    fn from(request: UpdateServiceRequest) -> Self {
        ServiceUpdate {
            name: request.name,
            description: request.description,
            image_url: request.image_url,
            rate: request.rate,
            currency: request.currency,
        }
    }
}

/// Update Service Handler
#[endpoint(
    tags("services"),
    summary = "Update Service",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Service updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Store is not owned by the caller"),
        (status_code = StatusCode::NOT_FOUND, description = "Service not found in this store"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    service: PathParam<Uuid>,
    json: JsonBody<UpdateServiceRequest>,
    depot: &mut Depot,
) -> Result<Json<ServiceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.current_vendor_or_403()?;

    let updated = state
        .app
        .services
        .update_service(
            vendor,
            store.into_inner().into(),
            service.into_inner().into(),
            json.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use marketplace_app::domain::services::{ServicesServiceError, records::ServiceUuid};

    use crate::test_helpers::{Mocks, TEST_STORE_UUID, make_service_record, service, vendor};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(
            mocks,
            Some(vendor()),
            Router::with_path("stores/{store}/services/{service}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_service_changes_rate() -> TestResult {
        let uuid = ServiceUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .services
            .expect_update_service()
            .once()
            .withf(move |_, _, service, update| {
                *service == uuid
                    && *update
                        == ServiceUpdate {
                            rate: Some(6_000),
                            ..ServiceUpdate::default()
                        }
            })
            .return_once(move |_, _, _, _| Ok(make_service_record(uuid, 6_000)));

        let mut res = TestClient::put(format!(
            "http://example.com/stores/{TEST_STORE_UUID}/services/{uuid}"
        ))
        .json(&json!({ "rate": 6_000 }))
        .send(&make_service(mocks))
        .await;

        let body: ServiceResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.rate, 6_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_service_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .services
            .expect_update_service()
            .once()
            .return_once(|_, _, _, _| Err(ServicesServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/stores/{TEST_STORE_UUID}/services/{}",
            Uuid::now_v7()
        ))
        .json(&json!({ "name": "Resoling" }))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
