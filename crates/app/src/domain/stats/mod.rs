//! Marketplace-wide statistics for administrators.

pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::StatsServiceError;
pub use service::*;
