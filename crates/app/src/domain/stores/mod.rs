//! Stores

mod contact;
pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use contact::is_e164_phone_number;
pub use errors::StoresServiceError;
pub use service::*;
