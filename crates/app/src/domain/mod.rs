//! Marketplace Domain Concerns

pub mod orders;
pub mod products;
pub mod services;
pub mod stats;
pub mod stores;
pub mod users;
pub mod vendors;

/// Currency applied to prices and rates when the caller omits one.
pub const DEFAULT_CURRENCY: &str = "USD";
