//! # store-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `store-core`. It handles:
//!
//! - Connection pool management and runtime migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the row-locked stock take
//!
//! ## Usage
//!
//! ```rust,ignore
//! use store_db::pool::{create_pool, run_migrations, PoolConfig};
//! use store_db::repositories::PgProductRepository;
//! use store_core::traits::ProductRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PoolConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool, "migrations").await?;
//!
//!     let products = PgProductRepository::new(pool);
//!     let accounts = products.take_accounts(1, "netflix", 2).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgBotRepository, PgCategoryRepository, PgProductRepository, PgSalesRepository,
    PgStatsRepository, PgTransactionRepository, PgUserRepository,
};
