//! Identity Webhook Handler
//!
//! Mirrors identity-provider user lifecycle events into the local users table.
//! Payloads are signed with the Svix scheme and verified before anything is
//! written.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::prelude::*;
use tracing::{debug, error, info};

use marketplace_app::{
    auth::{WebhookError, parse_identity_event},
    domain::users::data::IdentityEvent,
};

use crate::{extensions::*, state::State, users::errors::into_status_error};

const ID_HEADER: &str = "svix-id";
const TIMESTAMP_HEADER: &str = "svix-timestamp";
const SIGNATURE_HEADER: &str = "svix-signature";

fn webhook_error(error: WebhookError) -> StatusError {
    match error {
        WebhookError::MissingHeaders => {
            StatusError::bad_request().brief("Missing webhook signature headers")
        }
        WebhookError::InvalidTimestamp => {
            StatusError::bad_request().brief("Invalid webhook timestamp")
        }
        WebhookError::InvalidPayload(reason) => {
            debug!("rejected identity webhook payload: {reason}");

            StatusError::bad_request().brief("Invalid webhook payload")
        }
        WebhookError::StaleTimestamp => {
            StatusError::unauthorized().brief("Webhook timestamp outside tolerance")
        }
        WebhookError::InvalidSignature => {
            StatusError::unauthorized().brief("Invalid webhook signature")
        }
        WebhookError::InvalidSecret => {
            error!("identity webhook secret is not valid base64");

            StatusError::internal_server_error()
        }
    }
}

fn event_kind(event: &IdentityEvent) -> &str {
    match event {
        IdentityEvent::Created(_) => "user.created",
        IdentityEvent::Updated(_) => "user.updated",
        IdentityEvent::Deleted { .. } => "user.deleted",
        IdentityEvent::Ignored { kind } => kind,
    }
}

/// Identity Webhook Handler
#[endpoint(
    tags("webhooks"),
    summary = "Receive Identity Provider Events",
    responses(
        (status_code = StatusCode::OK, description = "Event applied or ignored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed event or headers"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Signature verification failed"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let header = |name: &str| req.header::<String>(name).unwrap_or_default();

    let id = header(ID_HEADER);
    let timestamp = header(TIMESTAMP_HEADER);
    let signatures = header(SIGNATURE_HEADER);

    let body = req
        .payload()
        .await
        .or_400("Unreadable webhook body")?
        .clone();

    state
        .webhooks
        .verify(&id, &timestamp, &signatures, &body, Timestamp::now())
        .map_err(webhook_error)?;

    let event = parse_identity_event(&body).map_err(webhook_error)?;
    let kind = event_kind(&event).to_owned();

    state
        .app
        .users
        .sync_identity_event(event)
        .await
        .map_err(into_status_error)?;

    info!(webhook_id = %id, kind = %kind, "applied identity event");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use salvo::test::{RequestBuilder, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use marketplace_app::{
        auth::WebhookVerifier,
        domain::users::{UsersServiceError, data::IdentityProfile},
    };

    use crate::test_helpers::{Mocks, TEST_WEBHOOK_SECRET, service};

    use super::*;

    const URL: &str = "http://example.com/webhooks/identity";

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, None, Router::with_path("webhooks/identity").post(handler))
    }

    fn created_event() -> Value {
        json!({
            "type": "user.created",
            "data": {
                "id": "user_2abc",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "username": "ada",
                "email_addresses": [{ "email_address": "ada@example.com" }],
            },
        })
    }

    /// Build a request signed at `signed_at` with the test secret.
    fn signed(body: &Value, signed_at: Timestamp) -> TestResult<RequestBuilder> {
        let payload = serde_json::to_vec(body)?;
        let timestamp = signed_at.as_second().to_string();

        let signature = WebhookVerifier::new(TEST_WEBHOOK_SECRET)?
            .sign("msg_1", &timestamp, &payload)
            .ok_or("test secret should produce a signature")?;

        Ok(TestClient::post(URL)
            .add_header(ID_HEADER, "msg_1", true)
            .add_header(TIMESTAMP_HEADER, timestamp, true)
            .add_header(SIGNATURE_HEADER, signature, true)
            .raw_json(String::from_utf8(payload)?))
    }

    #[tokio::test]
    async fn test_signed_created_event_syncs_user() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_sync_identity_event()
            .once()
            .withf(|event| {
                *event
                    == IdentityEvent::Created(IdentityProfile {
                        subject: "user_2abc".to_string(),
                        name: "Ada Lovelace".to_string(),
                        email: Some("ada@example.com".to_string()),
                        username: Some("ada".to_string()),
                        avatar_url: None,
                    })
            })
            .return_once(|_| Ok(()));

        let res = signed(&created_event(), Timestamp::now())?
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_tampered_body_returns_401() -> TestResult {
        let payload = serde_json::to_vec(&created_event())?;
        let timestamp = Timestamp::now().as_second().to_string();

        let signature = WebhookVerifier::new(TEST_WEBHOOK_SECRET)?
            .sign("msg_1", &timestamp, &payload)
            .ok_or("test secret should produce a signature")?;

        let res = TestClient::post(URL)
            .add_header(ID_HEADER, "msg_1", true)
            .add_header(TIMESTAMP_HEADER, timestamp, true)
            .add_header(SIGNATURE_HEADER, signature, true)
            .raw_json(r#"{"type":"user.deleted","data":{"id":"user_2abc"}}"#)
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_stale_timestamp_returns_401() -> TestResult {
        let an_hour_ago = Timestamp::now().checked_sub(SignedDuration::from_hours(1))?;

        let res = signed(&created_event(), an_hour_ago)?
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_headers_returns_400() -> TestResult {
        let res = TestClient::post(URL)
            .json(&created_event())
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_event_type_is_acknowledged() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_sync_identity_event()
            .once()
            .withf(|event| {
                matches!(event, IdentityEvent::Ignored { kind } if kind == "session.created")
            })
            .return_once(|_| Ok(()));

        let body = json!({ "type": "session.created", "data": { "id": "sess_1" } });

        let res = signed(&body, Timestamp::now())?
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_created_event_without_email_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_sync_identity_event()
            .once()
            .return_once(|_| Err(UsersServiceError::MissingEmail));

        let mut body = created_event();
        body["data"]["email_addresses"] = json!([]);

        let res = signed(&body, Timestamp::now())?
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_for_unknown_user_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_sync_identity_event()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let mut body = created_event();
        body["type"] = json!("user.updated");

        let res = signed(&body, Timestamp::now())?
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
