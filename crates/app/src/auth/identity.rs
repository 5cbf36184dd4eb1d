//! Identity provider client for OAuth 2.0 token introspection (RFC 7662).

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Configuration for reaching the identity provider.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Introspection endpoint, e.g. `"https://auth.example.com/oauth/token_info"`.
    pub introspection_url: String,

    /// Secret key used to authenticate this server to the provider.
    pub secret_key: String,
}

/// Resolves bearer tokens to identity-provider subjects.
#[automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the token's subject, or `None` when the token is not active.
    async fn introspect(&self, token: &str) -> Result<Option<String>, IdentityError>;
}

/// HTTP client for the identity provider's introspection endpoint.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    config: IdentityConfig,
    http: Client,
}

impl IdentityClient {
    #[must_use]
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl IdentityProvider for IdentityClient {
    async fn introspect(&self, token: &str) -> Result<Option<String>, IdentityError> {
        let response = self
            .http
            .post(&self.config.introspection_url)
            .bearer_auth(&self.config.secret_key)
            .form(&[("token", token)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(IdentityError::UnexpectedResponse(format!(
                "introspection failed with status {status}: {text}"
            )));
        }

        let parsed: IntrospectionResponse = response.json().await?;

        Ok(parsed.into_subject())
    }
}

#[derive(Debug, Deserialize)]
struct IntrospectionResponse {
    active: bool,
    #[serde(default)]
    sub: Option<String>,
}

impl IntrospectionResponse {
    fn into_subject(self) -> Option<String> {
        self.sub
            .filter(|subject| self.active && !subject.is_empty())
    }
}

/// Errors that can occur when communicating with the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-2xx response.
    #[error("unexpected response from identity provider: {0}")]
    UnexpectedResponse(String),
}
