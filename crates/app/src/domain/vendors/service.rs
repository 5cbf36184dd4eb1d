//! Vendors service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        users::records::UserUuid,
        vendors::{
            data::{NewVendor, VendorUpdate},
            errors::VendorsServiceError,
            records::{VendorRecord, VendorUuid},
            repository::PgVendorsRepository,
        },
    },
    pagination::{Page, PageRequest, count_to_total},
};

#[derive(Debug, Clone)]
pub struct PgVendorsService {
    db: Db,
    repository: PgVendorsRepository,
}

impl PgVendorsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgVendorsRepository::new(),
        }
    }
}

#[async_trait]
impl VendorsService for PgVendorsService {
    async fn create_vendor(
        &self,
        user: UserUuid,
        vendor: NewVendor,
    ) -> Result<VendorRecord, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_vendor(&mut tx, user, &vendor).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_vendor(&self, vendor: VendorUuid) -> Result<VendorRecord, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let vendor = self.repository.get_vendor(&mut tx, vendor).await?;

        tx.commit().await?;

        Ok(vendor)
    }

    async fn list_vendors(
        &self,
        page: PageRequest,
    ) -> Result<Page<VendorRecord>, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let (vendors, total) = self.repository.list_vendors(&mut tx, page).await?;

        tx.commit().await?;

        Ok(Page::new(vendors, count_to_total(total)?, page))
    }

    async fn update_vendor(
        &self,
        user: UserUuid,
        vendor: VendorUuid,
        update: VendorUpdate,
    ) -> Result<VendorRecord, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_vendor(&mut tx, vendor, user, &update)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => VendorsServiceError::NotAuthorized,
                other => other.into(),
            })?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "vendors.service.delete_vendor",
        skip(self),
        fields(user_uuid = %user, vendor_uuid = %vendor),
        err
    )]
    async fn delete_vendor(
        &self,
        user: UserUuid,
        vendor: VendorUuid,
    ) -> Result<(), VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_vendor(&mut tx, vendor, user).await?;

        if rows_affected == 0 {
            return Err(VendorsServiceError::NotAuthorized);
        }

        self.repository.delete_vendor_catalog(&mut tx, vendor).await?;

        tx.commit().await?;

        info!("deleted vendor");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait VendorsService: Send + Sync {
    /// Create the vendor profile for `user`. A user holds at most one live profile.
    async fn create_vendor(
        &self,
        user: UserUuid,
        vendor: NewVendor,
    ) -> Result<VendorRecord, VendorsServiceError>;

    /// Retrieve a single live vendor.
    async fn get_vendor(&self, vendor: VendorUuid) -> Result<VendorRecord, VendorsServiceError>;

    /// List live vendors, newest first.
    async fn list_vendors(
        &self,
        page: PageRequest,
    ) -> Result<Page<VendorRecord>, VendorsServiceError>;

    /// Update a vendor owned by `user`.
    async fn update_vendor(
        &self,
        user: UserUuid,
        vendor: VendorUuid,
        update: VendorUpdate,
    ) -> Result<VendorRecord, VendorsServiceError>;

    /// Soft-delete a vendor owned by `user` together with its stores, products and services.
    async fn delete_vendor(
        &self,
        user: UserUuid,
        vendor: VendorUuid,
    ) -> Result<(), VendorsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{products::ProductsService, stores::StoresService},
        test::{
            TestContext,
            helpers::{create_product, create_store, create_user, create_vendor},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_vendor_starts_inactive() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "user_1").await?;

        let vendor = ctx
            .vendors
            .create_vendor(
                user.uuid,
                NewVendor {
                    uuid: VendorUuid::new(),
                    display_name: "Ada's Atelier".to_string(),
                    description: Some("Handmade goods".to_string()),
                    image_url: None,
                },
            )
            .await?;

        assert_eq!(vendor.user_uuid, Some(user.uuid));
        assert_eq!(vendor.display_name, "Ada's Atelier");
        assert!(!vendor.is_active, "vendor without stores should be inactive");

        Ok(())
    }

    #[tokio::test]
    async fn second_vendor_for_same_user_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "user_1").await?;

        create_vendor(&ctx, user.uuid).await?;

        let result = create_vendor(&ctx, user.uuid).await;

        assert!(
            matches!(result, Err(VendorsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_vendors_paginates() -> TestResult {
        let ctx = TestContext::new().await;

        for index in 0..3 {
            let user = create_user(&ctx, &format!("user_{index}")).await?;
            create_vendor(&ctx, user.uuid).await?;
        }

        let page = ctx.vendors.list_vendors(PageRequest::new(Some(2), Some(2))).await?;

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages(), 2);
        assert!(!page.has_next(), "second page of two should be the last");
        assert!(page.has_previous(), "second page should have a previous page");

        Ok(())
    }

    #[tokio::test]
    async fn update_vendor_by_owner_changes_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "user_1").await?;
        let vendor = create_vendor(&ctx, user.uuid).await?;

        let updated = ctx
            .vendors
            .update_vendor(
                user.uuid,
                vendor.uuid,
                VendorUpdate {
                    display_name: Some("Renamed".to_string()),
                    ..VendorUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.display_name, "Renamed");
        assert_eq!(updated.description, vendor.description);

        Ok(())
    }

    #[tokio::test]
    async fn update_vendor_by_other_user_returns_not_authorized() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, "owner").await?;
        let intruder = create_user(&ctx, "intruder").await?;
        let vendor = create_vendor(&ctx, owner.uuid).await?;

        let result = ctx
            .vendors
            .update_vendor(intruder.uuid, vendor.uuid, VendorUpdate::default())
            .await;

        assert!(
            matches!(result, Err(VendorsServiceError::NotAuthorized)),
            "expected NotAuthorized, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_vendor_cascades_to_catalog() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "user_1").await?;
        let vendor = create_vendor(&ctx, user.uuid).await?;
        let store = create_store(&ctx, vendor.uuid, "ada-store").await?;
        let product = create_product(&ctx, vendor.uuid, store.uuid, 1_000).await?;

        ctx.vendors.delete_vendor(user.uuid, vendor.uuid).await?;

        let vendor_result = ctx.vendors.get_vendor(vendor.uuid).await;
        assert!(
            matches!(vendor_result, Err(VendorsServiceError::NotFound)),
            "expected deleted vendor to be NotFound, got {vendor_result:?}"
        );

        assert!(
            ctx.stores.get_store(store.uuid).await.is_err(),
            "store should be soft-deleted with its vendor"
        );
        assert!(
            ctx.products.get_product(product.uuid).await.is_err(),
            "product should be soft-deleted with its vendor"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_vendor_by_other_user_returns_not_authorized() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, "owner").await?;
        let intruder = create_user(&ctx, "intruder").await?;
        let vendor = create_vendor(&ctx, owner.uuid).await?;

        let result = ctx.vendors.delete_vendor(intruder.uuid, vendor.uuid).await;

        assert!(
            matches!(result, Err(VendorsServiceError::NotAuthorized)),
            "expected NotAuthorized, got {result:?}"
        );

        ctx.vendors.get_vendor(vendor.uuid).await?;

        Ok(())
    }
}
