//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::Unauthenticated => {
            StatusError::unauthorized().brief("Invalid or expired bearer token")
        }
        AuthServiceError::UnknownUser => {
            StatusError::unauthorized().brief("No user is registered for this token")
        }
        AuthServiceError::Identity(source) => {
            error!("identity provider error during authentication: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("failed to resolve authenticated user: {source}");

            StatusError::internal_server_error()
        }
    }
}
