//! Vendors Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::{
        users::records::UserUuid,
        vendors::{
            data::{NewVendor, VendorUpdate},
            records::{VendorRecord, VendorUuid},
        },
    },
    pagination::PageRequest,
};

const CREATE_VENDOR_SQL: &str = include_str!("sql/create_vendor.sql");
const GET_VENDOR_SQL: &str = include_str!("sql/get_vendor.sql");
const FIND_VENDOR_BY_USER_SQL: &str = include_str!("sql/find_vendor_by_user.sql");
const LIST_VENDORS_SQL: &str = include_str!("sql/list_vendors.sql");
const COUNT_VENDORS_SQL: &str = include_str!("sql/count_vendors.sql");
const UPDATE_VENDOR_SQL: &str = include_str!("sql/update_vendor.sql");
const DELETE_VENDOR_SQL: &str = include_str!("sql/delete_vendor.sql");
const DELETE_VENDOR_CATALOG_SQL: &str = include_str!("sql/delete_vendor_catalog.sql");
const REFRESH_VENDOR_ACTIVITY_SQL: &str = include_str!("sql/refresh_vendor_activity.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgVendorsRepository;

impl PgVendorsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        vendor: &NewVendor,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(CREATE_VENDOR_SQL)
            .bind(vendor.uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(&vendor.display_name)
            .bind(vendor.description.as_deref())
            .bind(vendor.image_url.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(GET_VENDOR_SQL)
            .bind(vendor.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_vendor_by_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<VendorRecord>, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(FIND_VENDOR_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_vendors(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<(Vec<VendorRecord>, i64), sqlx::Error> {
        let vendors = query_as::<Postgres, VendorRecord>(LIST_VENDORS_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_VENDORS_SQL).fetch_one(&mut **tx).await?;

        Ok((vendors, total))
    }

    /// Update a live vendor owned by `user`. Yields `RowNotFound` for any miss.
    pub(crate) async fn update_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
        user: UserUuid,
        update: &VendorUpdate,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(UPDATE_VENDOR_SQL)
            .bind(vendor.into_uuid())
            .bind(user.into_uuid())
            .bind(update.display_name.as_deref())
            .bind(update.description.as_deref())
            .bind(update.image_url.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_VENDOR_SQL)
            .bind(vendor.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Soft-delete every live store of the vendor along with their products and services.
    #[tracing::instrument(
        name = "vendors.repository.delete_vendor_catalog",
        skip(self, tx),
        fields(vendor_uuid = %vendor),
        err
    )]
    pub(crate) async fn delete_vendor_catalog(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<(), sqlx::Error> {
        let (stores, products, services): (i64, i64, i64) = query_as(DELETE_VENDOR_CATALOG_SQL)
            .bind(vendor.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        debug!(stores, products, services, "soft-deleted vendor catalog");

        Ok(())
    }

    /// Recompute `is_active` from the vendor's live stores and return the new value.
    pub(crate) async fn refresh_vendor_activity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(REFRESH_VENDOR_ACTIVITY_SQL)
            .bind(vendor.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for VendorRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: VendorUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: row
                .try_get::<Option<Uuid>, _>("user_uuid")?
                .map(UserUuid::from_uuid),
            display_name: row.try_get("display_name")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
