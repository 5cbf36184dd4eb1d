//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, IdentityClient, IdentityConfig, PgAuthService},
    database::{self, Db},
    domain::{
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        services::{PgServicesService, ServicesService},
        stats::{PgStatsService, StatsService},
        stores::{PgStoresService, StoresService},
        users::{PgUsersService, UsersService},
        vendors::{PgVendorsService, VendorsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Every domain service, sharing one connection pool.
#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub vendors: Arc<dyn VendorsService>,
    pub stores: Arc<dyn StoresService>,
    pub products: Arc<dyn ProductsService>,
    pub services: Arc<dyn ServicesService>,
    pub orders: Arc<dyn OrdersService>,
    pub stats: Arc<dyn StatsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        identity: IdentityConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool), identity))
    }

    #[must_use]
    pub fn from_db(db: Db, identity: IdentityConfig) -> Self {
        Self {
            users: Arc::new(PgUsersService::new(db.clone())),
            vendors: Arc::new(PgVendorsService::new(db.clone())),
            stores: Arc::new(PgStoresService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            services: Arc::new(PgServicesService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            stats: Arc::new(PgStatsService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(
                db,
                Arc::new(IdentityClient::new(identity)),
            )),
        }
    }
}
