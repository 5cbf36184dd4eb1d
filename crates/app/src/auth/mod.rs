//! Authentication

mod errors;
pub mod identity;
mod service;
pub mod webhook;

pub use errors::*;
pub use identity::{IdentityClient, IdentityConfig, IdentityError, IdentityProvider};
pub use service::*;
pub use webhook::{WebhookError, WebhookVerifier, parse_identity_event};
