//! Stores service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        products::repository::PgProductsRepository,
        services::repository::PgServicesRepository,
        stores::{
            contact::is_e164_phone_number,
            data::{NewStore, StoreUpdate},
            errors::StoresServiceError,
            records::{StoreDetails, StoreRecord, StoreUuid},
            repository::PgStoresRepository,
        },
        vendors::{records::VendorUuid, repository::PgVendorsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgStoresService {
    db: Db,
    repository: PgStoresRepository,
    vendors_repository: PgVendorsRepository,
    products_repository: PgProductsRepository,
    services_repository: PgServicesRepository,
}

impl PgStoresService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStoresRepository::new(),
            vendors_repository: PgVendorsRepository::new(),
            products_repository: PgProductsRepository::new(),
            services_repository: PgServicesRepository::new(),
        }
    }
}

fn validate_new_store(store: &NewStore) -> Result<(), StoresServiceError> {
    if store.url.trim().is_empty() || store.address.trim().is_empty() {
        return Err(StoresServiceError::MissingRequiredData);
    }

    if !is_e164_phone_number(&store.whatsapp_contact) {
        return Err(StoresServiceError::InvalidContact);
    }

    Ok(())
}

#[async_trait]
impl StoresService for PgStoresService {
    #[tracing::instrument(
        name = "stores.service.create_store",
        skip(self, store),
        fields(vendor_uuid = %vendor, store_uuid = %store.uuid, vendor_active = tracing::field::Empty),
        err
    )]
    async fn create_store(
        &self,
        vendor: VendorUuid,
        store: NewStore,
    ) -> Result<StoreRecord, StoresServiceError> {
        validate_new_store(&store)?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_store(&mut tx, vendor, &store).await?;

        let vendor_active = self
            .vendors_repository
            .refresh_vendor_activity(&mut tx, vendor)
            .await?;

        tracing::Span::current().record("vendor_active", vendor_active);

        tx.commit().await?;

        info!(url = %created.url, "created store");

        Ok(created)
    }

    async fn get_store(&self, store: StoreUuid) -> Result<StoreDetails, StoresServiceError> {
        let mut tx = self.db.begin().await?;

        let store = self.repository.get_store(&mut tx, store).await?;

        let products = self
            .products_repository
            .list_store_products(&mut tx, store.uuid)
            .await?;

        let services = self
            .services_repository
            .list_store_services(&mut tx, store.uuid)
            .await?;

        tx.commit().await?;

        Ok(StoreDetails {
            store,
            products,
            services,
        })
    }

    async fn list_vendor_stores(
        &self,
        vendor: VendorUuid,
    ) -> Result<Vec<StoreRecord>, StoresServiceError> {
        let mut tx = self.db.begin().await?;

        let stores = self.repository.list_vendor_stores(&mut tx, vendor).await?;

        tx.commit().await?;

        Ok(stores)
    }

    async fn update_store(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        update: StoreUpdate,
    ) -> Result<StoreRecord, StoresServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_store(&mut tx, store, vendor, &update)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => StoresServiceError::NotAuthorized,
                other => other.into(),
            })?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "stores.service.delete_store",
        skip(self),
        fields(vendor_uuid = %vendor, store_uuid = %store, vendor_active = tracing::field::Empty),
        err
    )]
    async fn delete_store(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
    ) -> Result<(), StoresServiceError> {
        let mut tx = self.db.begin().await?;

        let deleted = self.repository.delete_store(&mut tx, store, vendor).await?;

        if deleted == 0 {
            return Err(StoresServiceError::NotAuthorized);
        }

        let vendor_active = self
            .vendors_repository
            .refresh_vendor_activity(&mut tx, vendor)
            .await?;

        tracing::Span::current().record("vendor_active", vendor_active);

        tx.commit().await?;

        Ok(())
    }

    async fn is_url_available(&self, url: &str) -> Result<bool, StoresServiceError> {
        let mut tx = self.db.begin().await?;

        let taken = self.repository.store_url_taken(&mut tx, url).await?;

        tx.commit().await?;

        Ok(!taken)
    }

    async fn validate_store_ownership(
        &self,
        store: StoreUuid,
        vendor: VendorUuid,
    ) -> Result<(), StoresServiceError> {
        let mut tx = self.db.begin().await?;

        let owned = self
            .repository
            .find_owned_store(&mut tx, store, vendor)
            .await?;

        tx.commit().await?;

        owned.map(|_| ()).ok_or(StoresServiceError::NotAuthorized)
    }
}

#[automock]
#[async_trait]
pub trait StoresService: Send + Sync {
    /// Create a store for `vendor` and mark the vendor active.
    ///
    /// URL uniqueness is enforced by the database; a clash yields
    /// [`StoresServiceError::UrlTaken`].
    async fn create_store(
        &self,
        vendor: VendorUuid,
        store: NewStore,
    ) -> Result<StoreRecord, StoresServiceError>;

    /// Retrieve a live store with its live products and services.
    async fn get_store(&self, store: StoreUuid) -> Result<StoreDetails, StoresServiceError>;

    /// List the live stores of a vendor.
    async fn list_vendor_stores(
        &self,
        vendor: VendorUuid,
    ) -> Result<Vec<StoreRecord>, StoresServiceError>;

    /// Update a store owned by `vendor`.
    async fn update_store(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        update: StoreUpdate,
    ) -> Result<StoreRecord, StoresServiceError>;

    /// Soft-delete a store owned by `vendor` with its catalog, then recompute
    /// the vendor's active flag in the same transaction.
    async fn delete_store(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
    ) -> Result<(), StoresServiceError>;

    /// Whether no live store currently uses `url`. Advisory only.
    async fn is_url_available(&self, url: &str) -> Result<bool, StoresServiceError>;

    /// Confirm that `store` is a live store owned by `vendor`.
    ///
    /// Every mismatch yields [`StoresServiceError::NotAuthorized`].
    async fn validate_store_ownership(
        &self,
        store: StoreUuid,
        vendor: VendorUuid,
    ) -> Result<(), StoresServiceError>;
}
