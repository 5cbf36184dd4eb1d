//! Vendor Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::vendors::VendorsServiceError;

pub(crate) fn into_status_error(error: VendorsServiceError) -> StatusError {
    match error {
        VendorsServiceError::AlreadyExists => {
            StatusError::conflict().brief("User already has a vendor profile")
        }
        VendorsServiceError::NotFound => StatusError::not_found().brief("Vendor not found"),
        VendorsServiceError::NotAuthorized => {
            StatusError::forbidden().brief("Vendor is not owned by the caller")
        }
        VendorsServiceError::InvalidReference
        | VendorsServiceError::MissingRequiredData
        | VendorsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid vendor payload")
        }
        VendorsServiceError::Sql(source) => {
            error!("vendor storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
