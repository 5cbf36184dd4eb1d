//! Identity Provider Config

use clap::Args;

use marketplace_app::auth::IdentityConfig;

/// Identity provider settings.
#[derive(Debug, Args)]
pub struct IdentityProviderConfig {
    /// Token introspection endpoint of the identity provider
    #[arg(long, env = "IDENTITY_INTROSPECTION_URL")]
    pub introspection_url: String,

    /// Secret key sent with introspection requests
    #[arg(long, env = "IDENTITY_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Signing secret for user webhooks (`whsec_` followed by base64)
    #[arg(long, env = "IDENTITY_WEBHOOK_SECRET", hide_env_values = true)]
    pub webhook_secret: String,
}

impl IdentityProviderConfig {
    #[must_use]
    pub fn client_config(&self) -> IdentityConfig {
        IdentityConfig {
            introspection_url: self.introspection_url.clone(),
            secret_key: self.secret_key.clone(),
        }
    }
}
