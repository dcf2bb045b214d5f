//! Service context - dependency container for services
//!
//! Holds the connection pool and every repository the services need.

use std::sync::Arc;

use store_core::traits::{
    BotRepository, CategoryRepository, ProductRepository, SalesRepository, StatsRepository,
    TransactionRepository, UserRepository,
};
use store_db::{
    PgBotRepository, PgCategoryRepository, PgPool, PgProductRepository, PgSalesRepository,
    PgStatsRepository, PgTransactionRepository, PgUserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Repositories are held as trait objects so tests can swap in
/// in-memory implementations.
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,

    user_repo: Arc<dyn UserRepository>,
    bot_repo: Arc<dyn BotRepository>,
    product_repo: Arc<dyn ProductRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    transaction_repo: Arc<dyn TransactionRepository>,
    sales_repo: Arc<dyn SalesRepository>,
    stats_repo: Arc<dyn StatsRepository>,
}

impl ServiceContext {
    /// Wire the PostgreSQL repositories onto one pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            user_repo: Arc::new(PgUserRepository::new(pool.clone())),
            bot_repo: Arc::new(PgBotRepository::new(pool.clone())),
            product_repo: Arc::new(PgProductRepository::new(pool.clone())),
            category_repo: Arc::new(PgCategoryRepository::new(pool.clone())),
            transaction_repo: Arc::new(PgTransactionRepository::new(pool.clone())),
            sales_repo: Arc::new(PgSalesRepository::new(pool.clone())),
            stats_repo: Arc::new(PgStatsRepository::new(pool.clone())),
            pool,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn bot_repo(&self) -> &dyn BotRepository {
        self.bot_repo.as_ref()
    }

    pub fn product_repo(&self) -> &dyn ProductRepository {
        self.product_repo.as_ref()
    }

    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    pub fn transaction_repo(&self) -> &dyn TransactionRepository {
        self.transaction_repo.as_ref()
    }

    pub fn sales_repo(&self) -> &dyn SalesRepository {
        self.sales_repo.as_ref()
    }

    pub fn stats_repo(&self) -> &dyn StatsRepository {
        self.stats_repo.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom repositories
///
/// Any repository left unset falls back to the PostgreSQL implementation
/// over the builder's pool.
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    bot_repo: Option<Arc<dyn BotRepository>>,
    product_repo: Option<Arc<dyn ProductRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    transaction_repo: Option<Arc<dyn TransactionRepository>>,
    sales_repo: Option<Arc<dyn SalesRepository>>,
    stats_repo: Option<Arc<dyn StatsRepository>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn bot_repo(mut self, repo: Arc<dyn BotRepository>) -> Self {
        self.bot_repo = Some(repo);
        self
    }

    pub fn product_repo(mut self, repo: Arc<dyn ProductRepository>) -> Self {
        self.product_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn transaction_repo(mut self, repo: Arc<dyn TransactionRepository>) -> Self {
        self.transaction_repo = Some(repo);
        self
    }

    pub fn sales_repo(mut self, repo: Arc<dyn SalesRepository>) -> Self {
        self.sales_repo = Some(repo);
        self
    }

    pub fn stats_repo(mut self, repo: Arc<dyn StatsRepository>) -> Self {
        self.stats_repo = Some(repo);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the pool is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let pool = self
            .pool
            .ok_or_else(|| ServiceError::validation("pool is required"))?;
        let defaults = ServiceContext::from_pool(pool);

        Ok(ServiceContext {
            user_repo: self.user_repo.unwrap_or(defaults.user_repo),
            bot_repo: self.bot_repo.unwrap_or(defaults.bot_repo),
            product_repo: self.product_repo.unwrap_or(defaults.product_repo),
            category_repo: self.category_repo.unwrap_or(defaults.category_repo),
            transaction_repo: self.transaction_repo.unwrap_or(defaults.transaction_repo),
            sales_repo: self.sales_repo.unwrap_or(defaults.sales_repo),
            stats_repo: self.stats_repo.unwrap_or(defaults.stats_repo),
            pool: defaults.pool,
        })
    }
}
