//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::{
        orders::records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid},
        products::{records::ProductUuid, repository::product_from_row},
        stores::records::StoreUuid,
        users::records::UserUuid,
    },
    pagination::PageRequest,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const FINALIZE_ORDER_SQL: &str = include_str!("sql/finalize_order.sql");
const CREATE_ORDER_ITEMS_SQL: &str = include_str!("sql/create_order_items.sql");
const GET_USER_ORDER_SQL: &str = include_str!("sql/get_user_order.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("sql/list_user_orders.sql");
const COUNT_USER_ORDERS_SQL: &str = include_str!("sql/count_user_orders.sql");
const LIST_STORE_ORDERS_SQL: &str = include_str!("sql/list_store_orders.sql");
const COUNT_STORE_ORDERS_SQL: &str = include_str!("sql/count_store_orders.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("sql/count_orders.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const UPDATE_USER_ORDER_STATUS_SQL: &str = include_str!("sql/update_user_order_status.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

/// An order line resolved against its product, ready to insert.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PricedOrderItem {
    pub(crate) uuid: OrderItemUuid,
    pub(crate) product: ProductUuid,
    pub(crate) position: i32,
    pub(crate) quantity: i32,
    pub(crate) price: i64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an empty pending order for `buyer` with no store and a zero total.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        buyer: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(buyer.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn finalize_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        store: StoreUuid,
        total_amount: i64,
    ) -> Result<(), sqlx::Error> {
        query(FINALIZE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(store.into_uuid())
            .bind(total_amount)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "orders.repository.create_order_items",
        skip(self, tx, items),
        fields(order_uuid = %order, item_count = items.len()),
        err
    )]
    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        items: &[PricedOrderItem],
    ) -> Result<(), sqlx::Error> {
        if items.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = items.iter().map(|item| item.uuid.into_uuid()).collect();
        let products: Vec<Uuid> = items.iter().map(|item| item.product.into_uuid()).collect();
        let positions: Vec<i32> = items.iter().map(|item| item.position).collect();
        let quantities: Vec<i32> = items.iter().map(|item| item.quantity).collect();
        let prices: Vec<i64> = items.iter().map(|item| item.price).collect();

        query(CREATE_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .bind(&uuids)
            .bind(&products)
            .bind(&positions)
            .bind(&quantities)
            .bind(&prices)
            .execute(&mut **tx)
            .await?;

        debug!(item_count = items.len(), "created order items");

        Ok(())
    }

    pub(crate) async fn get_user_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        buyer: UserUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let order = query_as::<Postgres, OrderRecord>(GET_USER_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(buyer.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        let mut orders = [order];

        self.attach_items(tx, &mut orders).await?;

        let [order] = orders;

        Ok(order)
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        buyer: UserUuid,
        page: PageRequest,
    ) -> Result<(Vec<OrderRecord>, i64), sqlx::Error> {
        let mut orders = query_as::<Postgres, OrderRecord>(LIST_USER_ORDERS_SQL)
            .bind(buyer.into_uuid())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_USER_ORDERS_SQL)
            .bind(buyer.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        self.attach_items(tx, &mut orders).await?;

        Ok((orders, total))
    }

    pub(crate) async fn list_store_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        page: PageRequest,
    ) -> Result<(Vec<OrderRecord>, i64), sqlx::Error> {
        let mut orders = query_as::<Postgres, OrderRecord>(LIST_STORE_ORDERS_SQL)
            .bind(store.into_uuid())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_STORE_ORDERS_SQL)
            .bind(store.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        self.attach_items(tx, &mut orders).await?;

        Ok((orders, total))
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<(Vec<OrderRecord>, i64), sqlx::Error> {
        let mut orders = query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_ORDERS_SQL).fetch_one(&mut **tx).await?;

        self.attach_items(tx, &mut orders).await?;

        Ok((orders, total))
    }

    pub(crate) async fn update_user_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        buyer: UserUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        let order = query_as::<Postgres, OrderRecord>(UPDATE_USER_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(buyer.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await?;

        let mut orders = [order];

        self.attach_items(tx, &mut orders).await?;

        let [order] = orders;

        Ok(order)
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        let order = query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await?;

        let mut orders = [order];

        self.attach_items(tx, &mut orders).await?;

        let [order] = orders;

        Ok(order)
    }

    /// Load the items of every order in one query and attach them in position order.
    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), sqlx::Error> {
        if orders.is_empty() {
            return Ok(());
        }

        let order_uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let items = query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(&order_uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut by_order: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for item in items {
            by_order.entry(item.order_uuid).or_default().push(item);
        }

        for order in orders {
            order.items = by_order.remove(&order.uuid).unwrap_or_default();
        }

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let total_amount: i64 = row.try_get("total_amount")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: row
                .try_get::<Option<Uuid>, _>("user_uuid")?
                .map(UserUuid::from_uuid),
            store_uuid: row
                .try_get::<Option<Uuid>, _>("store_uuid")?
                .map(StoreUuid::from_uuid),
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            total_amount: u64::try_from(total_amount).map_err(|e| sqlx::Error::ColumnDecode {
                index: "total_amount".to_string(),
                source: Box::new(e),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            items: Vec::new(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity")?;
        let price: i64 = row.try_get("price")?;

        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?,
            price: u64::try_from(price).map_err(|e| sqlx::Error::ColumnDecode {
                index: "price".to_string(),
                source: Box::new(e),
            })?,
            product: product_from_row(row, "p_")?,
        })
    }
}
