//! Services service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        services::{
            data::{NewService, ServiceUpdate},
            errors::ServicesServiceError,
            records::{ServiceRecord, ServiceUuid},
            repository::PgServicesRepository,
        },
        stores::{records::StoreUuid, repository::PgStoresRepository},
        vendors::records::VendorUuid,
    },
    pagination::{Page, PageRequest, count_to_total},
};

#[derive(Debug, Clone)]
pub struct PgServicesService {
    db: Db,
    repository: PgServicesRepository,
    stores_repository: PgStoresRepository,
}

impl PgServicesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgServicesRepository::new(),
            stores_repository: PgStoresRepository::new(),
        }
    }

    async fn ensure_store_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
        store: StoreUuid,
    ) -> Result<(), ServicesServiceError> {
        match self.stores_repository.find_owned_store(tx, store, vendor).await? {
            Some(_) => Ok(()),
            None => Err(ServicesServiceError::NotAuthorized),
        }
    }
}

#[async_trait]
impl ServicesService for PgServicesService {
    async fn list_services(
        &self,
        page: PageRequest,
    ) -> Result<Page<ServiceRecord>, ServicesServiceError> {
        let mut tx = self.db.begin().await?;

        let (services, total) = self.repository.list_services(&mut tx, page).await?;

        tx.commit().await?;

        Ok(Page::new(services, count_to_total(total)?, page))
    }

    async fn search_services(
        &self,
        text: String,
        page: PageRequest,
    ) -> Result<Page<ServiceRecord>, ServicesServiceError> {
        let mut tx = self.db.begin().await?;

        let (services, total) = self.repository.search_services(&mut tx, &text, page).await?;

        tx.commit().await?;

        Ok(Page::new(services, count_to_total(total)?, page))
    }

    async fn list_store_services(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
    ) -> Result<Vec<ServiceRecord>, ServicesServiceError> {
        let mut tx = self.db.begin().await?;

        self.ensure_store_owner(&mut tx, vendor, store).await?;

        let services = self.repository.list_store_services(&mut tx, store).await?;

        tx.commit().await?;

        Ok(services)
    }

    #[tracing::instrument(
        name = "services.service.create_service",
        skip(self, service),
        fields(vendor_uuid = %vendor, store_uuid = %store, service_uuid = %service.uuid),
        err
    )]
    async fn create_service(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        service: NewService,
    ) -> Result<ServiceRecord, ServicesServiceError> {
        let rate = i64::try_from(service.rate)?;

        let mut tx = self.db.begin().await?;

        self.ensure_store_owner(&mut tx, vendor, store).await?;

        let created = self
            .repository
            .create_service(&mut tx, store, &service, rate)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_service(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        service: ServiceUuid,
        update: ServiceUpdate,
    ) -> Result<ServiceRecord, ServicesServiceError> {
        let rate = update.rate.map(i64::try_from).transpose()?;

        let mut tx = self.db.begin().await?;

        self.ensure_store_owner(&mut tx, vendor, store).await?;

        let updated = self
            .repository
            .update_service(&mut tx, store, service, &update, rate)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_service(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        service: ServiceUuid,
    ) -> Result<(), ServicesServiceError> {
        let mut tx = self.db.begin().await?;

        self.ensure_store_owner(&mut tx, vendor, store).await?;

        if self.repository.delete_service(&mut tx, store, service).await? == 0 {
            return Err(ServicesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ServicesService: Send + Sync {
    async fn list_services(
        &self,
        page: PageRequest,
    ) -> Result<Page<ServiceRecord>, ServicesServiceError>;

    /// Full-text search over service names and descriptions, most relevant first.
    async fn search_services(
        &self,
        text: String,
        page: PageRequest,
    ) -> Result<Page<ServiceRecord>, ServicesServiceError>;

    /// List the live services of a store owned by `vendor`.
    async fn list_store_services(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
    ) -> Result<Vec<ServiceRecord>, ServicesServiceError>;

    async fn create_service(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        service: NewService,
    ) -> Result<ServiceRecord, ServicesServiceError>;

    async fn update_service(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        service: ServiceUuid,
        update: ServiceUpdate,
    ) -> Result<ServiceRecord, ServicesServiceError>;

    async fn delete_service(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        service: ServiceUuid,
    ) -> Result<(), ServicesServiceError>;
}
