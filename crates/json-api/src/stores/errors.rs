//! Store Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::stores::StoresServiceError;

pub(crate) fn into_status_error(error: StoresServiceError) -> StatusError {
    match error {
        StoresServiceError::UrlTaken => StatusError::conflict().brief("Store URL is already taken"),
        StoresServiceError::NotFound => StatusError::not_found().brief("Store not found"),
        StoresServiceError::NotAuthorized => {
            StatusError::forbidden().brief("Store is not owned by the caller")
        }
        StoresServiceError::InvalidContact => StatusError::bad_request()
            .brief("WhatsApp contact must be an E.164 phone number such as +2348012345678"),
        StoresServiceError::InvalidReference
        | StoresServiceError::MissingRequiredData
        | StoresServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid store payload")
        }
        StoresServiceError::Sql(source) => {
            error!("store storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
