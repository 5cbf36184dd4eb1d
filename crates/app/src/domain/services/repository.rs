//! Services Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    domain::{
        services::{
            data::{NewService, ServiceUpdate},
            records::{ServiceRecord, ServiceUuid},
        },
        stores::records::StoreUuid,
    },
    pagination::PageRequest,
};

const LIST_SERVICES_SQL: &str = include_str!("sql/list_services.sql");
const COUNT_SERVICES_SQL: &str = include_str!("sql/count_services.sql");
const SEARCH_SERVICES_SQL: &str = include_str!("sql/search_services.sql");
const COUNT_SEARCH_SERVICES_SQL: &str = include_str!("sql/count_search_services.sql");
const LIST_STORE_SERVICES_SQL: &str = include_str!("sql/list_store_services.sql");
const CREATE_SERVICE_SQL: &str = include_str!("sql/create_service.sql");
const UPDATE_SERVICE_SQL: &str = include_str!("sql/update_service.sql");
const DELETE_SERVICE_SQL: &str = include_str!("sql/delete_service.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgServicesRepository;

impl PgServicesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_services(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<(Vec<ServiceRecord>, i64), sqlx::Error> {
        let services = query_as::<Postgres, ServiceRecord>(LIST_SERVICES_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_SERVICES_SQL)
            .fetch_one(&mut **tx)
            .await?;

        Ok((services, total))
    }

    pub(crate) async fn search_services(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        text: &str,
        page: PageRequest,
    ) -> Result<(Vec<ServiceRecord>, i64), sqlx::Error> {
        let services = query_as::<Postgres, ServiceRecord>(SEARCH_SERVICES_SQL)
            .bind(text)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_SEARCH_SERVICES_SQL)
            .bind(text)
            .fetch_one(&mut **tx)
            .await?;

        Ok((services, total))
    }

    pub(crate) async fn list_store_services(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<Vec<ServiceRecord>, sqlx::Error> {
        query_as::<Postgres, ServiceRecord>(LIST_STORE_SERVICES_SQL)
            .bind(store.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_service(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        service: &NewService,
        rate: i64,
    ) -> Result<ServiceRecord, sqlx::Error> {
        query_as::<Postgres, ServiceRecord>(CREATE_SERVICE_SQL)
            .bind(service.uuid.into_uuid())
            .bind(store.into_uuid())
            .bind(&service.name)
            .bind(service.description.as_deref())
            .bind(service.image_url.as_deref())
            .bind(rate)
            .bind(&service.currency)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_service(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        service: ServiceUuid,
        update: &ServiceUpdate,
        rate: Option<i64>,
    ) -> Result<ServiceRecord, sqlx::Error> {
        query_as::<Postgres, ServiceRecord>(UPDATE_SERVICE_SQL)
            .bind(service.into_uuid())
            .bind(store.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.description.as_deref())
            .bind(update.image_url.as_deref())
            .bind(rate)
            .bind(update.currency.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_service(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        service: ServiceUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SERVICE_SQL)
            .bind(service.into_uuid())
            .bind(store.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ServiceRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let rate_i64: i64 = row.try_get("rate")?;

        let rate = u64::try_from(rate_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "rate".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ServiceUuid::from_uuid(row.try_get("uuid")?),
            store_uuid: StoreUuid::from_uuid(row.try_get("store_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
            rate,
            currency: row.try_get("currency")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
