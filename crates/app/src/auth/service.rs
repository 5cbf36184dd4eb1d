//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{AuthServiceError, IdentityProvider},
    database::Db,
    domain::{
        users::{records::UserUuid, repository::PgUsersRepository},
        vendors::{records::VendorUuid, repository::PgVendorsRepository},
    },
};

/// The caller behind a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user: UserUuid,
    /// The caller's live vendor profile, if they have one.
    pub vendor: Option<VendorUuid>,
    pub is_admin: bool,
}

#[derive(Clone)]
pub struct PgAuthService {
    db: Db,
    identity: Arc<dyn IdentityProvider>,
    users_repository: PgUsersRepository,
    vendors_repository: PgVendorsRepository,
}

impl std::fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgAuthService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            db,
            identity,
            users_repository: PgUsersRepository::new(),
            vendors_repository: PgVendorsRepository::new(),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    #[tracing::instrument(
        name = "auth.service.authenticate_bearer",
        skip(self, bearer_token),
        fields(user_uuid = tracing::field::Empty),
        err
    )]
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let subject = self
            .identity
            .introspect(bearer_token)
            .await?
            .ok_or(AuthServiceError::Unauthenticated)?;

        let mut tx = self.db.begin().await?;

        let user = self
            .users_repository
            .find_user_by_subject(&mut tx, &subject)
            .await?
            .ok_or(AuthServiceError::UnknownUser)?;

        let vendor = self
            .vendors_repository
            .find_vendor_by_user(&mut tx, user.uuid)
            .await?;

        tx.commit().await?;

        tracing::Span::current().record("user_uuid", tracing::field::display(user.uuid));

        Ok(AuthenticatedUser {
            user: user.uuid,
            vendor: vendor.map(|vendor| vendor.uuid),
            is_admin: user.is_admin,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the local user it belongs to.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::identity::MockIdentityProvider,
        domain::users::UsersService,
        test::{
            TestContext,
            helpers::{create_user, create_vendor},
        },
    };

    use super::*;

    fn identity_returning(subject: Option<&'static str>) -> Arc<dyn IdentityProvider> {
        let mut identity = MockIdentityProvider::new();

        identity
            .expect_introspect()
            .once()
            .withf(|token| token == "token-123")
            .return_once(move |_| Ok(subject.map(str::to_string)));

        Arc::new(identity)
    }

    #[tokio::test]
    async fn debug_output_elides_identity_provider() {
        let ctx = TestContext::new().await;
        let service = PgAuthService::new(ctx.db.clone(), Arc::new(MockIdentityProvider::new()));

        let debug = format!("{service:?}");

        assert!(debug.starts_with("PgAuthService"), "unexpected debug output: {debug}");
        assert!(debug.ends_with(", .. }"), "identity provider should be elided: {debug}");
    }

    #[tokio::test]
    async fn active_token_resolves_local_user_and_vendor() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "user_1").await?;
        let vendor = create_vendor(&ctx, user.uuid).await?;

        let auth = PgAuthService::new(ctx.db.clone(), identity_returning(Some("user_1")));

        let authenticated = auth.authenticate_bearer("token-123").await?;

        assert_eq!(
            authenticated,
            AuthenticatedUser {
                user: user.uuid,
                vendor: Some(vendor.uuid),
                is_admin: false,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn inactive_token_is_unauthenticated() {
        let ctx = TestContext::new().await;
        let auth = PgAuthService::new(ctx.db.clone(), identity_returning(None));

        let result = auth.authenticate_bearer("token-123").await;

        assert!(
            matches!(result, Err(AuthServiceError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unknown_subject_is_rejected() {
        let ctx = TestContext::new().await;
        let auth = PgAuthService::new(ctx.db.clone(), identity_returning(Some("ghost")));

        let result = auth.authenticate_bearer("token-123").await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownUser)),
            "expected UnknownUser, got {result:?}"
        );
    }

    #[tokio::test]
    async fn admin_flag_is_carried() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "admin_1").await?;

        ctx.users.set_admin("admin_1", true).await?;

        let auth = PgAuthService::new(ctx.db.clone(), identity_returning(Some("admin_1")));

        let authenticated = auth.authenticate_bearer("token-123").await?;

        assert_eq!(authenticated.user, user.uuid);
        assert_eq!(authenticated.vendor, None);
        assert!(authenticated.is_admin, "admin flag should be carried");

        Ok(())
    }
}
