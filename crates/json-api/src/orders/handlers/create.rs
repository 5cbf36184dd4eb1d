//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use marketplace_app::domain::{
    orders::data::{NewOrder, NewOrderItem},
    products::records::ProductUuid,
};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderItemRequest {
    pub product_uuid: Uuid,

    /// Must be at least 1
    pub quantity: u32,
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Items in the order they should be processed. Products must share a store.
    pub items: Vec<CreateOrderItemRequest>,
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = StatusError;

    fn try_from(request: CreateOrderRequest) -> Result<Self, Self::Error> {
        let items = request
            .items
            .into_iter()
            .map(|item| {
                if item.quantity == 0 {
                    return Err(StatusError::bad_request().brief("Item quantity must be positive"));
                }

                Ok(NewOrderItem {
                    product: ProductUuid::from_uuid(item.product_uuid),
                    quantity: item.quantity,
                })
            })
            .collect::<Result<SmallVec<_>, _>>()?;

        Ok(NewOrder { items })
    }
}

/// Create Order Handler
///
/// Places an order for the caller. Prices are frozen at the current product prices.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty, mixed-store or unknown items"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.current_user_or_401()?;

    let order = state
        .app
        .orders
        .create_order(caller.user, json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use marketplace_app::domain::{
        orders::{OrdersServiceError, records::OrderUuid},
        stores::records::StoreUuid,
    };

    use crate::test_helpers::{
        Mocks, TEST_STORE_UUID, TEST_USER_UUID, buyer, make_order, make_product, service,
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Some(buyer()), Router::with_path("orders").post(handler))
    }

    #[tokio::test]
    async fn test_create_order_success() -> TestResult {
        let boots = make_product(ProductUuid::new(), 10);
        let laces = make_product(ProductUuid::new(), 5);
        let (boots_uuid, laces_uuid) = (boots.uuid, laces.uuid);

        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_create_order()
            .once()
            .withf(move |user, order| {
                *user == TEST_USER_UUID
                    && order.items.as_slice()
                        == [
                            NewOrderItem { product: boots_uuid, quantity: 2 },
                            NewOrderItem { product: laces_uuid, quantity: 1 },
                        ]
            })
            .return_once(move |_, _| Ok(make_order(OrderUuid::new(), &[(boots, 2), (laces, 1)])));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "items": [
                    { "product_uuid": boots_uuid.into_uuid(), "quantity": 2 },
                    { "product_uuid": laces_uuid.into_uuid(), "quantity": 1 },
                ]
            }))
            .send(&make_service(mocks))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.total_amount, 25);
        assert_eq!(body.store_uuid, Some(TEST_STORE_UUID.into_uuid()));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_zero_quantity_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "items": [{ "product_uuid": Uuid::nil(), "quantity": 0 }] }))
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_empty_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_create_order()
            .once()
            .withf(|_, order| order.items.is_empty())
            .return_once(|_, _| Err(OrdersServiceError::EmptyOrder));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "items": [] }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_across_stores_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.orders.expect_create_order().once().return_once(|_, _| {
            Err(OrdersServiceError::CrossStore {
                expected: TEST_STORE_UUID,
                found: StoreUuid::new(),
            })
        });

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "items": [
                    { "product_uuid": Uuid::from_u128(10), "quantity": 1 },
                    { "product_uuid": Uuid::from_u128(11), "quantity": 1 },
                ]
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
