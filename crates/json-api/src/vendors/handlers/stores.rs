//! Vendor Stores Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    stores::{errors::into_status_error, get::StoreResponse},
};

/// Vendor Stores Handler
///
/// Returns the live stores of a vendor.
#[endpoint(tags("vendors", "stores"), summary = "List Vendor Stores")]
pub(crate) async fn handler(
    vendor: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<StoreResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stores = state
        .app
        .stores
        .list_vendor_stores(vendor.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(stores.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::domain::stores::records::StoreUuid;

    use crate::test_helpers::{Mocks, TEST_VENDOR_UUID, make_store, service};

    use super::*;

    #[tokio::test]
    async fn test_vendor_stores_lists_live_stores() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .stores
            .expect_list_vendor_stores()
            .once()
            .withf(|vendor| *vendor == TEST_VENDOR_UUID)
            .return_once(|_| {
                Ok(vec![
                    make_store(StoreUuid::new()),
                    make_store(StoreUuid::new()),
                ])
            });

        let body: Vec<StoreResponse> =
            TestClient::get(format!("http://example.com/vendors/{TEST_VENDOR_UUID}/stores"))
                .send(&service(
                    mocks,
                    None,
                    Router::with_path("vendors/{vendor}/stores").get(handler),
                ))
                .await
                .take_json()
                .await?;

        assert_eq!(body.len(), 2);
        assert!(
            body.iter().all(|store| store.vendor_uuid == TEST_VENDOR_UUID.into_uuid()),
            "every store should belong to the vendor"
        );

        Ok(())
    }
}
