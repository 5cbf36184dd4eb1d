//! Stats service errors.

use thiserror::Error;

/// Errors returned by [`crate::domain::stats::StatsService`].
#[derive(Debug, Error)]
pub enum StatsServiceError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
