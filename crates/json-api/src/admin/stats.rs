//! Marketplace Stats Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use marketplace_app::domain::stats::{StatsServiceError, records::StatsRecord};

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatsResponse {
    pub total_orders: u64,

    /// Live products only
    pub total_products: u64,

    pub total_users: u64,
}

impl From<StatsRecord> for StatsResponse {
    fn from(stats: StatsRecord) -> Self {
        StatsResponse {
            total_orders: stats.total_orders,
            total_products: stats.total_products,
            total_users: stats.total_users,
        }
    }
}

fn into_status_error(error: StatsServiceError) -> StatusError {
    match error {
        StatsServiceError::Sql(source) => {
            error!("stats storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Marketplace Stats Handler
#[endpoint(
    tags("admin"),
    summary = "Get Marketplace Stats",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Row counts across the marketplace"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator access required"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state.app.stats.get_stats().await.map_err(into_status_error)?;

    Ok(Json(stats.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::auth::AuthenticatedUser;

    use crate::{
        auth::admin::require_admin,
        test_helpers::{Mocks, admin, buyer, service},
    };

    use super::*;

    fn make_service(mocks: Mocks, caller: AuthenticatedUser) -> Service {
        service(
            mocks,
            Some(caller),
            Router::with_path("admin/stats")
                .hoop(require_admin)
                .get(handler),
        )
    }

    #[tokio::test]
    async fn test_admin_reads_stats() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.stats.expect_get_stats().once().return_once(|| {
            Ok(StatsRecord {
                total_orders: 4,
                total_products: 12,
                total_users: 7,
            })
        });

        let body: StatsResponse = TestClient::get("http://example.com/admin/stats")
            .send(&make_service(mocks, admin()))
            .await
            .take_json()
            .await?;

        assert_eq!(body.total_orders, 4);
        assert_eq!(body.total_products, 12);
        assert_eq!(body.total_users, 7);

        Ok(())
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden() -> TestResult {
        let res = TestClient::get("http://example.com/admin/stats")
            .send(&make_service(Mocks::default(), buyer()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
