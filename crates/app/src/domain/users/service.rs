//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::users::{
        data::{IdentityEvent, NewUser, UserProfileUpdate},
        errors::UsersServiceError,
        records::{UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        user: UserUuid,
        update: UserProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_user_profile(&mut tx, user, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "users.service.sync_identity_event",
        skip(self, event),
        fields(event_kind = tracing::field::Empty),
        err
    )]
    async fn sync_identity_event(&self, event: IdentityEvent) -> Result<(), UsersServiceError> {
        let span = tracing::Span::current();

        match event {
            IdentityEvent::Created(profile) => {
                span.record("event_kind", "created");

                let new = NewUser::try_from(profile)?;
                let mut tx = self.db.begin().await?;

                let created = self
                    .repository
                    .create_user(&mut tx, UserUuid::new(), &new)
                    .await?;

                tx.commit().await?;

                info!(user_uuid = %created.uuid, "created user from identity event");
            }
            IdentityEvent::Updated(profile) => {
                span.record("event_kind", "updated");

                let mut tx = self.db.begin().await?;

                let updated = self
                    .repository
                    .update_user_identity(&mut tx, &profile)
                    .await?;

                tx.commit().await?;

                info!(user_uuid = %updated.uuid, "updated user from identity event");
            }
            IdentityEvent::Deleted { subject } => {
                span.record("event_kind", "deleted");

                let mut tx = self.db.begin().await?;

                let rows_affected = self
                    .repository
                    .delete_user_by_subject(&mut tx, &subject)
                    .await?;

                tx.commit().await?;

                info!(rows_affected, "deleted user from identity event");
            }
            IdentityEvent::Ignored { kind } => {
                span.record("event_kind", kind.as_str());

                debug!("ignoring identity event");
            }
        }

        Ok(())
    }

    async fn set_admin(
        &self,
        subject: &str,
        is_admin: bool,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .set_user_admin(&mut tx, subject, is_admin)
            .await?;

        tx.commit().await?;

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Update the caller-editable profile fields. Absent fields are left unchanged.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: UserProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Apply an identity-provider lifecycle event to the local user table.
    ///
    /// Created events require an email address and a username. Updated events
    /// fail with [`UsersServiceError::NotFound`] when the subject is unknown.
    /// Deleting an unknown subject is a no-op.
    async fn sync_identity_event(&self, event: IdentityEvent) -> Result<(), UsersServiceError>;

    /// Grant or revoke the admin flag for the user with the given subject.
    async fn set_admin(&self, subject: &str, is_admin: bool)
    -> Result<UserRecord, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{
        domain::{
            orders::{
                OrdersService,
                data::{NewOrder, NewOrderItem},
            },
            users::data::IdentityProfile,
            vendors::VendorsService,
        },
        pagination::PageRequest,
        test::{
            TestContext,
            helpers::{create_product, create_store, create_user, create_vendor},
        },
    };

    use super::*;

    fn profile(subject: &str) -> IdentityProfile {
        IdentityProfile {
            subject: subject.to_string(),
            name: "Ada Lovelace".to_string(),
            email: Some(format!("{subject}@example.com")),
            username: Some(subject.to_string()),
            avatar_url: Some("https://img.example.com/ada.png".to_string()),
        }
    }

    #[tokio::test]
    async fn created_event_inserts_user() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .sync_identity_event(IdentityEvent::Created(profile("user_1")))
            .await?;

        let user = ctx.find_user("user_1").await?;

        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.email, "user_1@example.com");
        assert_eq!(user.username, "user_1");
        assert!(!user.is_admin);

        Ok(())
    }

    #[tokio::test]
    async fn created_event_without_email_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .sync_identity_event(IdentityEvent::Created(IdentityProfile {
                email: None,
                ..profile("user_1")
            }))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::MissingEmail)),
            "expected MissingEmail, got {result:?}"
        );
    }

    #[tokio::test]
    async fn created_event_without_username_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .sync_identity_event(IdentityEvent::Created(IdentityProfile {
                username: Some("  ".to_string()),
                ..profile("user_1")
            }))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::MissingUsername)),
            "expected MissingUsername, got {result:?}"
        );
    }

    #[tokio::test]
    async fn duplicate_created_event_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .sync_identity_event(IdentityEvent::Created(profile("user_1")))
            .await?;

        let result = ctx
            .users
            .sync_identity_event(IdentityEvent::Created(profile("user_1")))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn updated_event_changes_identity_fields() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, "user_1").await?;

        ctx.users
            .sync_identity_event(IdentityEvent::Updated(IdentityProfile {
                subject: "user_1".to_string(),
                name: "Grace Hopper".to_string(),
                email: Some("grace@example.com".to_string()),
                username: None,
                avatar_url: None,
            }))
            .await?;

        let user = ctx.find_user("user_1").await?;

        assert_eq!(user.name, "Grace Hopper");
        assert_eq!(user.email, "grace@example.com");
        assert_eq!(user.username, "user_1", "absent username should be kept");

        Ok(())
    }

    #[tokio::test]
    async fn updated_event_without_name_keeps_stored_name() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, "user_1").await?;

        ctx.users
            .sync_identity_event(IdentityEvent::Updated(IdentityProfile {
                subject: "user_1".to_string(),
                name: String::new(),
                email: Some("ada@example.com".to_string()),
                username: None,
                avatar_url: None,
            }))
            .await?;

        let user = ctx.find_user("user_1").await?;

        assert_eq!(user.name, "Ada Lovelace", "empty name should not blank the stored one");
        assert_eq!(user.email, "ada@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn updated_event_without_name_keeps_profile_name() -> TestResult {
        let ctx = TestContext::new().await;

        let user = create_user(&ctx, "user_1").await?;

        ctx.users
            .update_profile(
                user.uuid,
                UserProfileUpdate {
                    name: Some("Countess of Lovelace".to_string()),
                    ..UserProfileUpdate::default()
                },
            )
            .await?;

        ctx.users
            .sync_identity_event(IdentityEvent::Updated(IdentityProfile {
                name: String::new(),
                ..profile("user_1")
            }))
            .await?;

        let user = ctx.find_user("user_1").await?;

        assert_eq!(user.name, "Countess of Lovelace");

        Ok(())
    }

    #[tokio::test]
    async fn updated_event_for_unknown_subject_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .sync_identity_event(IdentityEvent::Updated(profile("ghost")))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn deleted_event_removes_user() -> TestResult {
        let ctx = TestContext::new().await;

        let user = create_user(&ctx, "user_1").await?;

        ctx.users
            .sync_identity_event(IdentityEvent::Deleted {
                subject: "user_1".to_string(),
            })
            .await?;

        let result = ctx.users.get_user(user.uuid).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleted_event_detaches_vendor_and_orders() -> TestResult {
        let ctx = TestContext::new().await;

        let seller = create_user(&ctx, "seller").await?;
        let vendor = create_vendor(&ctx, seller.uuid).await?;
        let store = create_store(&ctx, vendor.uuid, "seller-store").await?;
        let product = create_product(&ctx, vendor.uuid, store.uuid, 1_000).await?;

        let order = ctx
            .orders
            .create_order(
                seller.uuid,
                NewOrder {
                    items: smallvec![NewOrderItem {
                        product: product.uuid,
                        quantity: 1,
                    }],
                },
            )
            .await?;

        ctx.users
            .sync_identity_event(IdentityEvent::Deleted {
                subject: "seller".to_string(),
            })
            .await?;

        let vendor = ctx.vendors.get_vendor(vendor.uuid).await?;
        assert_eq!(vendor.user_uuid, None, "vendor should outlive its user");

        let orders = ctx.orders.list_all_orders(PageRequest::new(None, None)).await?;
        let kept = orders.items.iter().find(|candidate| candidate.uuid == order.uuid);

        assert!(kept.is_some(), "order should outlive its buyer");
        assert_eq!(kept.and_then(|order| order.user_uuid), None);
        assert_eq!(kept.and_then(|order| order.store_uuid), Some(store.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn ignored_event_is_accepted() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .sync_identity_event(IdentityEvent::Ignored {
                kind: "session.created".to_string(),
            })
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_keeps_absent_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let user = create_user(&ctx, "user_1").await?;

        let updated = ctx
            .users
            .update_profile(
                user.uuid,
                UserProfileUpdate {
                    address: Some("1 Market Street".to_string()),
                    phone: Some("+2348012345678".to_string()),
                    ..UserProfileUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, user.name);
        assert_eq!(updated.address.as_deref(), Some("1 Market Street"));
        assert_eq!(updated.phone.as_deref(), Some("+2348012345678"));

        Ok(())
    }

    #[tokio::test]
    async fn set_admin_toggles_flag() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, "user_1").await?;

        let granted = ctx.users.set_admin("user_1", true).await?;
        assert!(granted.is_admin);

        let revoked = ctx.users.set_admin("user_1", false).await?;
        assert!(!revoked.is_admin);

        Ok(())
    }

    #[tokio::test]
    async fn set_admin_unknown_subject_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.set_admin("ghost", true).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
