//! Stats service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::stats::{
        errors::StatsServiceError, records::StatsRecord, repository::PgStatsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgStatsService {
    db: Db,
    repository: PgStatsRepository,
}

impl PgStatsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStatsRepository::new(),
        }
    }
}

#[async_trait]
impl StatsService for PgStatsService {
    async fn get_stats(&self) -> Result<StatsRecord, StatsServiceError> {
        let mut tx = self.db.begin().await?;

        let stats = self.repository.get_stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Count orders, live products and users.
    async fn get_stats(&self) -> Result<StatsRecord, StatsServiceError>;
}
