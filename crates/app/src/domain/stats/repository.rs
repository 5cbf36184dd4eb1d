//! Stats Repository

use sqlx::{Postgres, Transaction, query_as};

use crate::{domain::stats::records::StatsRecord, pagination::count_to_total};

const GET_STATS_SQL: &str = include_str!("sql/get_stats.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStatsRepository;

impl PgStatsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<StatsRecord, sqlx::Error> {
        let (orders, products, users): (i64, i64, i64) =
            query_as(GET_STATS_SQL).fetch_one(&mut **tx).await?;

        Ok(StatsRecord {
            total_orders: count_to_total(orders)?,
            total_products: count_to_total(products)?,
            total_users: count_to_total(users)?,
        })
    }
}
