//! Service Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::services::ServicesServiceError;

pub(crate) fn into_status_error(error: ServicesServiceError) -> StatusError {
    match error {
        ServicesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Service already exists")
        }
        ServicesServiceError::NotFound => StatusError::not_found().brief("Service not found"),
        ServicesServiceError::NotAuthorized => {
            StatusError::forbidden().brief("Store is not owned by the caller")
        }
        ServicesServiceError::InvalidReference
        | ServicesServiceError::MissingRequiredData
        | ServicesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid service payload")
        }
        ServicesServiceError::InvalidRate(_) => {
            StatusError::bad_request().brief("Service rate is out of range")
        }
        ServicesServiceError::Sql(source) => {
            error!("service storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
