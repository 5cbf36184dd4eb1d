//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderItemUuid, OrderRecord, OrderStatus, OrderUuid},
            repository::{PgOrdersRepository, PricedOrderItem},
        },
        products::{records::ProductUuid, repository::PgProductsRepository},
        stores::{records::StoreUuid, repository::PgStoresRepository},
        users::records::UserUuid,
        vendors::records::VendorUuid,
    },
    pagination::{Page, PageRequest, count_to_total},
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    products_repository: PgProductsRepository,
    stores_repository: PgStoresRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            products_repository: PgProductsRepository::new(),
            stores_repository: PgStoresRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, order),
        fields(
            buyer_uuid = %buyer,
            item_count = order.items.len(),
            order_uuid = tracing::field::Empty,
            store_uuid = tracing::field::Empty,
            total_amount = tracing::field::Empty
        ),
        err
    )]
    async fn create_order(
        &self,
        buyer: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if order.items.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        let order_uuid = OrderUuid::new();
        let span = tracing::Span::current();

        span.record("order_uuid", tracing::field::display(order_uuid));

        let mut tx = self.db.begin().await?;

        self.repository.create_order(&mut tx, order_uuid, buyer).await?;

        let mut resolved: FxHashMap<ProductUuid, (StoreUuid, u64)> = FxHashMap::default();
        let mut priced: SmallVec<[PricedOrderItem; 4]> = SmallVec::with_capacity(order.items.len());
        let mut order_store: Option<StoreUuid> = None;
        let mut total: u64 = 0;

        for (position, item) in (0_i32..).zip(order.items.iter()) {
            let (store, price) = match resolved.get(&item.product) {
                Some(found) => *found,
                None => {
                    let product = self
                        .products_repository
                        .find_product(&mut tx, item.product)
                        .await?
                        .ok_or(OrdersServiceError::ProductNotFound(item.product))?;

                    let found = (product.store_uuid, product.price);

                    resolved.insert(item.product, found);

                    found
                }
            };

            let expected = *order_store.get_or_insert(store);

            if expected != store {
                return Err(OrdersServiceError::CrossStore {
                    expected,
                    found: store,
                });
            }

            let line_total = price
                .checked_mul(u64::from(item.quantity))
                .ok_or(OrdersServiceError::TotalOverflow)?;

            total = total
                .checked_add(line_total)
                .ok_or(OrdersServiceError::TotalOverflow)?;

            priced.push(PricedOrderItem {
                uuid: OrderItemUuid::new(),
                product: item.product,
                position,
                quantity: i32::try_from(item.quantity)
                    .map_err(|_ignored| OrdersServiceError::InvalidData)?,
                price: i64::try_from(price).map_err(|_ignored| OrdersServiceError::TotalOverflow)?,
            });
        }

        let Some(store) = order_store else {
            return Err(OrdersServiceError::EmptyOrder);
        };

        let total_amount = i64::try_from(total).map_err(|_ignored| OrdersServiceError::TotalOverflow)?;

        self.repository
            .finalize_order(&mut tx, order_uuid, store, total_amount)
            .await?;

        self.repository
            .create_order_items(&mut tx, order_uuid, &priced)
            .await?;

        tx.commit().await?;

        span.record("store_uuid", tracing::field::display(store));
        span.record("total_amount", total);

        info!("created order");

        let mut tx = self.db.begin().await?;

        let created = self.repository.get_user_order(&mut tx, order_uuid, buyer).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_order(
        &self,
        buyer: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_user_order(&mut tx, order, buyer).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(
        &self,
        buyer: UserUuid,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let (orders, total) = self.repository.list_user_orders(&mut tx, buyer, page).await?;

        tx.commit().await?;

        Ok(Page::new(orders, count_to_total(total)?, page))
    }

    async fn list_store_orders(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        if self
            .stores_repository
            .find_owned_store(&mut tx, store, vendor)
            .await?
            .is_none()
        {
            return Err(OrdersServiceError::NotAuthorized);
        }

        let (orders, total) = self.repository.list_store_orders(&mut tx, store, page).await?;

        tx.commit().await?;

        Ok(Page::new(orders, count_to_total(total)?, page))
    }

    async fn list_all_orders(
        &self,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let (orders, total) = self.repository.list_orders(&mut tx, page).await?;

        tx.commit().await?;

        Ok(Page::new(orders, count_to_total(total)?, page))
    }

    #[tracing::instrument(
        name = "orders.service.update_status",
        skip(self),
        fields(buyer_uuid = %buyer, order_uuid = %order, status = %status),
        err
    )]
    async fn update_status(
        &self,
        buyer: UserUuid,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_user_order_status(&mut tx, order, buyer, status)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "orders.service.update_status_admin",
        skip(self),
        fields(order_uuid = %order, status = %status),
        err
    )]
    async fn update_status_admin(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_order_status(&mut tx, order, status)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order for `buyer`.
    ///
    /// Every item must reference a live product and all products must belong
    /// to the same store. Item prices are frozen at the current product price
    /// and the total is their sum. Nothing is persisted unless every item
    /// resolves.
    async fn create_order(
        &self,
        buyer: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve an order placed by `buyer`. Orders of other buyers are `NotFound`.
    async fn get_order(
        &self,
        buyer: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// List the orders placed by `buyer`, newest first.
    async fn list_orders(
        &self,
        buyer: UserUuid,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError>;

    /// List the orders placed against a store owned by `vendor`.
    async fn list_store_orders(
        &self,
        vendor: VendorUuid,
        store: StoreUuid,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError>;

    /// List every order. Callers must check for admin privileges.
    async fn list_all_orders(
        &self,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError>;

    /// Overwrite the status of an order placed by `buyer`.
    async fn update_status(
        &self,
        buyer: UserUuid,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Overwrite the status of any order. Callers must check for admin privileges.
    async fn update_status_admin(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
