//! Signed identity webhooks.
//!
//! Payloads are signed with HMAC-SHA256 over `"{id}.{timestamp}.{body}"`
//! using a base64 secret carried after a `whsec_` prefix. The signature header
//! holds one or more space-separated `v1,<base64>` entries.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use jiff::{SignedDuration, Timestamp};
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::domain::users::data::{IdentityEvent, IdentityProfile};

type HmacSha256 = Hmac<Sha256>;

const SECRET_PREFIX: &str = "whsec_";
const SIGNATURE_VERSION: &str = "v1";

/// Maximum distance between the signed timestamp and the local clock.
pub const TIMESTAMP_TOLERANCE: SignedDuration = SignedDuration::from_secs(5 * 60);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WebhookError {
    #[error("webhook secret is not valid base64")]
    InvalidSecret,

    #[error("missing webhook signature headers")]
    MissingHeaders,

    #[error("webhook timestamp is malformed")]
    InvalidTimestamp,

    #[error("webhook timestamp is outside the tolerance window")]
    StaleTimestamp,

    #[error("no webhook signature matched")]
    InvalidSignature,

    #[error("malformed webhook payload: {0}")]
    InvalidPayload(String),
}

/// Verifies webhook signatures against a shared secret.
pub struct WebhookVerifier {
    key: Zeroizing<Vec<u8>>,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier").finish_non_exhaustive()
    }
}

impl WebhookVerifier {
    /// Build a verifier from a `whsec_`-prefixed (or bare) base64 secret.
    pub fn new(secret: &str) -> Result<Self, WebhookError> {
        let encoded = secret.strip_prefix(SECRET_PREFIX).unwrap_or(secret);

        let key = BASE64
            .decode(encoded)
            .map_err(|_ignored| WebhookError::InvalidSecret)?;

        Ok(Self {
            key: Zeroizing::new(key),
        })
    }

    /// Check the signature headers against `body`.
    ///
    /// Any one matching `v1` signature is accepted. Other versions are skipped.
    pub fn verify(
        &self,
        id: &str,
        timestamp: &str,
        signatures: &str,
        body: &[u8],
        now: Timestamp,
    ) -> Result<(), WebhookError> {
        if id.is_empty() || timestamp.is_empty() || signatures.is_empty() {
            return Err(WebhookError::MissingHeaders);
        }

        let seconds: i64 = timestamp
            .trim()
            .parse()
            .map_err(|_ignored| WebhookError::InvalidTimestamp)?;

        let signed_at =
            Timestamp::from_second(seconds).map_err(|_ignored| WebhookError::InvalidTimestamp)?;

        if now.duration_since(signed_at).abs() > TIMESTAMP_TOLERANCE {
            return Err(WebhookError::StaleTimestamp);
        }

        let mut mac =
            HmacSha256::new_from_slice(&self.key).map_err(|_ignored| WebhookError::InvalidSecret)?;

        mac.update(id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(body);

        let matched = signatures
            .split_whitespace()
            .filter_map(|entry| entry.split_once(','))
            .filter(|(version, _)| *version == SIGNATURE_VERSION)
            .filter_map(|(_, signature)| BASE64.decode(signature).ok())
            .any(|signature| mac.clone().verify_slice(&signature).is_ok());

        if matched {
            Ok(())
        } else {
            Err(WebhookError::InvalidSignature)
        }
    }

    /// Compute the `v1,<base64>` signature entry for a payload.
    #[must_use]
    pub fn sign(&self, id: &str, timestamp: &str, body: &[u8]) -> Option<String> {
        let mut mac = HmacSha256::new_from_slice(&self.key).ok()?;

        mac.update(id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(body);

        Some(format!(
            "{SIGNATURE_VERSION},{}",
            BASE64.encode(mac.finalize().into_bytes())
        ))
    }
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    profile_image_url: Option<String>,
    #[serde(default)]
    email_addresses: Vec<RawEmailAddress>,
}

#[derive(Debug, Deserialize)]
struct RawEmailAddress {
    email_address: String,
}

#[derive(Debug, Deserialize)]
struct RawDeletedUser {
    id: String,
}

impl From<RawUser> for IdentityProfile {
    fn from(user: RawUser) -> Self {
        let name = [user.first_name, user.last_name]
            .into_iter()
            .flatten()
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            subject: user.id,
            name,
            email: user
                .email_addresses
                .into_iter()
                .next()
                .map(|address| address.email_address),
            username: user.username,
            avatar_url: user.profile_image_url,
        }
    }
}

/// Decode a verified webhook body into an identity event.
///
/// Event types other than `user.created`, `user.updated` and `user.deleted`
/// decode to [`IdentityEvent::Ignored`].
pub fn parse_identity_event(body: &[u8]) -> Result<IdentityEvent, WebhookError> {
    let raw: RawEvent = serde_json::from_slice(body)
        .map_err(|error| WebhookError::InvalidPayload(error.to_string()))?;

    let invalid = |error: serde_json::Error| WebhookError::InvalidPayload(error.to_string());

    match raw.kind.as_str() {
        "user.created" => {
            let user: RawUser = serde_json::from_value(raw.data).map_err(invalid)?;

            Ok(IdentityEvent::Created(user.into()))
        }
        "user.updated" => {
            let user: RawUser = serde_json::from_value(raw.data).map_err(invalid)?;

            Ok(IdentityEvent::Updated(user.into()))
        }
        "user.deleted" => {
            let user: RawDeletedUser = serde_json::from_value(raw.data).map_err(invalid)?;

            Ok(IdentityEvent::Deleted { subject: user.id })
        }
        _ => Ok(IdentityEvent::Ignored { kind: raw.kind }),
    }
}
