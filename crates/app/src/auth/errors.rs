//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::IdentityError;

/// Errors returned by [`crate::auth::AuthService`].
#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("token is not active")]
    Unauthenticated,

    #[error("no local user for token subject")]
    UnknownUser,

    #[error("identity provider error")]
    Identity(#[from] IdentityError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
