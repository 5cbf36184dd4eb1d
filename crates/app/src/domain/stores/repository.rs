//! Stores Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use tracing::debug;

use crate::domain::{
    stores::{
        data::{NewStore, StoreUpdate},
        records::{StoreRecord, StoreUuid},
    },
    vendors::records::VendorUuid,
};

const CREATE_STORE_SQL: &str = include_str!("sql/create_store.sql");
const GET_STORE_SQL: &str = include_str!("sql/get_store.sql");
const FIND_OWNED_STORE_SQL: &str = include_str!("sql/find_owned_store.sql");
const LIST_VENDOR_STORES_SQL: &str = include_str!("sql/list_vendor_stores.sql");
const UPDATE_STORE_SQL: &str = include_str!("sql/update_store.sql");
const DELETE_STORE_SQL: &str = include_str!("sql/delete_store.sql");
const STORE_URL_TAKEN_SQL: &str = include_str!("sql/store_url_taken.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStoresRepository;

impl PgStoresRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
        store: &NewStore,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(CREATE_STORE_SQL)
            .bind(store.uuid.into_uuid())
            .bind(vendor.into_uuid())
            .bind(&store.name)
            .bind(store.description.as_deref())
            .bind(store.logo_url.as_deref())
            .bind(&store.url)
            .bind(&store.address)
            .bind(&store.whatsapp_contact)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(GET_STORE_SQL)
            .bind(store.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Look up a live store by id and owning vendor.
    ///
    /// A missing store, a deleted store and a store of another vendor all yield `None`.
    pub(crate) async fn find_owned_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        vendor: VendorUuid,
    ) -> Result<Option<StoreRecord>, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(FIND_OWNED_STORE_SQL)
            .bind(store.into_uuid())
            .bind(vendor.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_vendor_stores(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<Vec<StoreRecord>, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(LIST_VENDOR_STORES_SQL)
            .bind(vendor.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        vendor: VendorUuid,
        update: &StoreUpdate,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(UPDATE_STORE_SQL)
            .bind(store.into_uuid())
            .bind(vendor.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.description.as_deref())
            .bind(update.logo_url.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    /// Soft-delete a store owned by `vendor` along with its products and services.
    ///
    /// Returns the number of stores deleted (0 or 1).
    #[tracing::instrument(
        name = "stores.repository.delete_store",
        skip(self, tx),
        fields(store_uuid = %store, vendor_uuid = %vendor),
        err
    )]
    pub(crate) async fn delete_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        vendor: VendorUuid,
    ) -> Result<i64, sqlx::Error> {
        let (stores, products, services): (i64, i64, i64) = query_as(DELETE_STORE_SQL)
            .bind(store.into_uuid())
            .bind(vendor.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        debug!(stores, products, services, "soft-deleted store catalog");

        Ok(stores)
    }

    pub(crate) async fn store_url_taken(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        url: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(STORE_URL_TAKEN_SQL)
            .bind(url)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for StoreRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: StoreUuid::from_uuid(row.try_get("uuid")?),
            vendor_uuid: VendorUuid::from_uuid(row.try_get("vendor_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            logo_url: row.try_get("logo_url")?,
            url: row.try_get("url")?,
            address: row.try_get("address")?,
            whatsapp_contact: row.try_get("whatsapp_contact")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
