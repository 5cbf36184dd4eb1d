//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    identity::IdentityProviderConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod identity;
pub(crate) mod observability;
pub(crate) mod server;

/// Marketplace JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "marketplace-json", about = "Marketplace JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Tracing export and request logging settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Identity provider settings for bearer tokens and user webhooks.
    #[command(flatten)]
    pub identity: IdentityProviderConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // A missing .env file is fine
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const REQUIRED: [&str; 9] = [
        "marketplace-json",
        "--database-url",
        "postgres://localhost/marketplace",
        "--introspection-url",
        "https://identity.example.com/oauth/token_info",
        "--secret-key",
        "sk_test",
        "--webhook-secret",
        "whsec_c2VjcmV0",
    ];

    #[test]
    fn required_settings_parse_with_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED)?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.observability.otel_service_name, "marketplace-json");
        assert_eq!(config.identity.secret_key, "sk_test");
        assert!(
            !config.observability.otel_parent_propagation_enabled,
            "parent propagation should be off by default"
        );

        Ok(())
    }

    #[test]
    fn missing_identity_settings_is_an_error() {
        let result = ServerConfig::try_parse_from([
            "marketplace-json",
            "--database-url",
            "postgres://localhost/marketplace",
        ]);

        assert!(result.is_err(), "identity settings should be required");
    }
}
