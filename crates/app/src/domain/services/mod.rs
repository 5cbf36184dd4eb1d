//! Services offered by stores, such as repairs or lessons.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::ServicesServiceError;
pub use service::*;
