//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    domain::{
        products::{
            data::{NewProduct, ProductUpdate},
            records::{ProductRecord, ProductUuid},
        },
        stores::records::StoreUuid,
    },
    pagination::PageRequest,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const SEARCH_PRODUCTS_SQL: &str = include_str!("sql/search_products.sql");
const COUNT_SEARCH_PRODUCTS_SQL: &str = include_str!("sql/count_search_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LIST_STORE_PRODUCTS_SQL: &str = include_str!("sql/list_store_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

/// Storage representations of the unsigned numeric product columns.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProductAmounts {
    pub(crate) price: i64,
    pub(crate) stock: i32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<(Vec<ProductRecord>, i64), sqlx::Error> {
        let products = query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .fetch_one(&mut **tx)
            .await?;

        Ok((products, total))
    }

    /// Full-text search ranked by relevance. The query text is always bound, never spliced.
    pub(crate) async fn search_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        text: &str,
        page: PageRequest,
    ) -> Result<(Vec<ProductRecord>, i64), sqlx::Error> {
        let products = query_as::<Postgres, ProductRecord>(SEARCH_PRODUCTS_SQL)
            .bind(text)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_SEARCH_PRODUCTS_SQL)
            .bind(text)
            .fetch_one(&mut **tx)
            .await?;

        Ok((products, total))
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Like [`Self::get_product`] but a missing or deleted product yields `None`.
    pub(crate) async fn find_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_store_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_STORE_PRODUCTS_SQL)
            .bind(store.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        product: &NewProduct,
        amounts: ProductAmounts,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(store.into_uuid())
            .bind(&product.name)
            .bind(product.description.as_deref())
            .bind(product.image_url.as_deref())
            .bind(amounts.price)
            .bind(&product.currency)
            .bind(amounts.stock)
            .bind(product.category.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    #[expect(
        clippy::too_many_arguments,
        reason = "the update binds every optional column separately"
    )]
    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        product: ProductUuid,
        update: &ProductUpdate,
        price: Option<i64>,
        stock: Option<i32>,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(store.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.description.as_deref())
            .bind(update.image_url.as_deref())
            .bind(price)
            .bind(update.currency.as_deref())
            .bind(stock)
            .bind(update.category.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(store.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// Decode a product from columns named `{prefix}uuid`, `{prefix}name`, ...
///
/// Joined queries select product columns under a prefix to avoid clashing
/// with the columns of the row that references the product.
pub(crate) fn product_from_row(row: &PgRow, prefix: &str) -> sqlx::Result<ProductRecord> {
    let column = |name: &str| format!("{prefix}{name}");

    let price_i64: i64 = row.try_get(column("price").as_str())?;
    let stock_i32: i32 = row.try_get(column("stock").as_str())?;

    let price = u64::try_from(price_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: column("price"),
        source: Box::new(e),
    })?;

    let stock = u32::try_from(stock_i32).map_err(|e| sqlx::Error::ColumnDecode {
        index: column("stock"),
        source: Box::new(e),
    })?;

    Ok(ProductRecord {
        uuid: ProductUuid::from_uuid(row.try_get(column("uuid").as_str())?),
        store_uuid: StoreUuid::from_uuid(row.try_get(column("store_uuid").as_str())?),
        name: row.try_get(column("name").as_str())?,
        description: row.try_get(column("description").as_str())?,
        image_url: row.try_get(column("image_url").as_str())?,
        price,
        currency: row.try_get(column("currency").as_str())?,
        stock,
        category: row.try_get(column("category").as_str())?,
        created_at: row
            .try_get::<SqlxTimestamp, _>(column("created_at").as_str())?
            .to_jiff(),
        updated_at: row
            .try_get::<SqlxTimestamp, _>(column("updated_at").as_str())?
            .to_jiff(),
        deleted_at: row
            .try_get::<Option<SqlxTimestamp>, _>(column("deleted_at").as_str())?
            .map(SqlxTimestamp::to_jiff),
    })
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        product_from_row(row, "")
    }
}
