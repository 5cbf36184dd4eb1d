//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyOrder => {
            StatusError::bad_request().brief("An order needs at least one item")
        }
        OrdersServiceError::ProductNotFound(product) => {
            StatusError::bad_request().brief(format!("Product {product} not found"))
        }
        OrdersServiceError::CrossStore { .. } => {
            StatusError::bad_request().brief("All products of an order must come from one store")
        }
        OrdersServiceError::TotalOverflow => {
            StatusError::bad_request().brief("Order total exceeds the supported range")
        }
        OrdersServiceError::InvalidStatus(source) => {
            StatusError::bad_request()
                .brief(format!("{source}, expected pending, success or rejected"))
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::NotAuthorized => {
            StatusError::forbidden().brief("Store is not owned by the caller")
        }
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use marketplace_app::domain::{
        orders::records::{OrderStatus, UnknownOrderStatus},
        stores::records::StoreUuid,
    };

    use super::*;

    #[test]
    fn validation_failures_map_to_bad_request() {
        let errors = [
            OrdersServiceError::EmptyOrder,
            OrdersServiceError::CrossStore {
                expected: StoreUuid::new(),
                found: StoreUuid::new(),
            },
            OrdersServiceError::TotalOverflow,
            OrdersServiceError::InvalidStatus(UnknownOrderStatus("shipped".to_string())),
        ];

        for error in errors {
            assert_eq!(into_status_error(error).code, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn unknown_status_brief_names_the_accepted_values() {
        let error = "shipped".parse::<OrderStatus>().map_err(OrdersServiceError::from);

        let brief = error.map_err(into_status_error).err().map(|error| error.brief);

        assert_eq!(
            brief.as_deref(),
            Some("unknown order status: shipped, expected pending, success or rejected")
        );
    }

    #[test]
    fn missing_order_maps_to_not_found() {
        assert_eq!(
            into_status_error(OrdersServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
    }
}
