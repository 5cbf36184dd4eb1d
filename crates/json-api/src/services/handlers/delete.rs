//! Delete Service Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, services::errors::into_status_error, state::State};

/// Delete Service Handler
#[endpoint(
    tags("services"),
    summary = "Delete Service",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Service deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Store is not owned by the caller"),
        (status_code = StatusCode::NOT_FOUND, description = "Service not found in this store"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    service: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.current_vendor_or_403()?;

    state
        .app
        .services
        .delete_service(vendor, store.into_inner().into(), service.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use marketplace_app::domain::services::records::ServiceUuid;

    use crate::test_helpers::{Mocks, TEST_STORE_UUID, TEST_VENDOR_UUID, service, vendor};

    use super::*;

    #[tokio::test]
    async fn test_delete_service_success() -> TestResult {
        let uuid = ServiceUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .services
            .expect_delete_service()
            .once()
            .withf(move |vendor, store, service| {
                *vendor == TEST_VENDOR_UUID && *store == TEST_STORE_UUID && *service == uuid
            })
            .return_once(|_, _, _| Ok(()));

        let res = TestClient::delete(format!(
            "http://example.com/stores/{TEST_STORE_UUID}/services/{uuid}"
        ))
        .send(&service(
            mocks,
            Some(vendor()),
            Router::with_path("stores/{store}/services/{service}").delete(handler),
        ))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
