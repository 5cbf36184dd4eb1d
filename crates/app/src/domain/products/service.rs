//! Products service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        products::{
            data::{NewProduct, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::{PgProductsRepository, ProductAmounts},
        },
        stores::{records::StoreUuid, repository::PgStoresRepository},
        vendors::records::VendorUuid,
    },
    pagination::{Page, PageRequest, count_to_total},
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    stores_repository: PgStoresRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            stores_repository: PgStoresRepository::new(),
        }
    }

    async fn ensure_store_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
        store: StoreUuid,
    ) -> Result<(), ProductsServiceError> {
        self.stores_repository
            .find_owned_store(tx, store, vendor)
            .await?
            .map(|_| ())
            .ok_or(ProductsServiceError::NotAuthorized)
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let (products, total) = self.repository.list_products(&mut tx, page).await?;

        tx.commit().await?;

        Ok(Page::new(products, count_to_total(total)?, page))
    }

    #[tracing::instrument(
        name = "products.service.search_products",
        skip(self),
        fields(results = tracing::field::Empty),
        err
    )]
    async fn search_products(
        &self,
        text: String,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let (products, total) = self.repository.search_products(&mut tx, &text, page).await?;

        tx.commit().await?;

        tracing::Span::current().record("results", total);

        Ok(Page::new(products, count_to_total(total)?, page))
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(vendor_uuid = %vendor, store_uuid = %store, product_uuid = %product.uuid),
        err
    )]
    async fn create_product(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let amounts = ProductAmounts {
            price: i64::try_from(product.price)?,
            stock: i32::try_from(product.stock)?,
        };

        let mut tx = self.db.begin().await?;

        self.ensure_store_owner(&mut tx, vendor, store).await?;

        let created = self
            .repository
            .create_product(&mut tx, store, &product, amounts)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let price = update.price.map(i64::try_from).transpose()?;
        let stock = update.stock.map(i32::try_from).transpose()?;

        let mut tx = self.db.begin().await?;

        self.ensure_store_owner(&mut tx, vendor, store).await?;

        let updated = self
            .repository
            .update_product(&mut tx, store, product, &update, price, stock)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        self.ensure_store_owner(&mut tx, vendor, store).await?;

        let rows_affected = self.repository.delete_product(&mut tx, store, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List live products, newest first.
    async fn list_products(
        &self,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Full-text search over product names and descriptions.
    ///
    /// Results are ordered by relevance.
    async fn search_products(
        &self,
        text: String,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single live product.
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Add a product to a store owned by `vendor`.
    async fn create_product(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Update a product in a store owned by `vendor`.
    async fn update_product(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-delete a product in a store owned by `vendor`.
    async fn delete_product(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;
}
