//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    orders::records::UnknownOrderStatus, products::records::ProductUuid,
    stores::records::StoreUuid,
};

/// Errors returned by [`crate::domain::orders::OrdersService`].
#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// The order carries no line items.
    #[error("order has no items")]
    EmptyOrder,

    /// A line item names a product that is missing or deleted.
    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    /// Line items belong to more than one store.
    #[error("order mixes products of store {expected} and store {found}")]
    CrossStore {
        /// Store of the first line item.
        expected: StoreUuid,
        /// Store of the first line item that differs.
        found: StoreUuid,
    },

    /// The order total does not fit the stored amount column.
    #[error("order total exceeds the supported range")]
    TotalOverflow,

    /// The requested status is not pending, success or rejected.
    #[error(transparent)]
    InvalidStatus(#[from] UnknownOrderStatus),

    /// The order does not exist or belongs to another buyer.
    #[error("order not found")]
    NotFound,

    /// The caller does not own the store whose orders were requested.
    #[error("not authorized to view orders of this store")]
    NotAuthorized,

    /// A foreign key points at a missing row.
    #[error("related resource not found")]
    InvalidReference,

    /// A required column was null.
    #[error("missing required data")]
    MissingRequiredData,

    /// A value violated a check constraint or does not fit its column.
    #[error("invalid data")]
    InvalidData,

    /// Any other database failure.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
