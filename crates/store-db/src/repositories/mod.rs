//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in store-core.
//! Operations that must commit together share connection-level helpers so a
//! single transaction can drive them.

mod bot;
mod category;
mod error;
mod product;
mod sales;
mod stats;
mod transaction;
mod user;

pub use bot::PgBotRepository;
pub use category::PgCategoryRepository;
pub use product::PgProductRepository;
pub use sales::PgSalesRepository;
pub use stats::PgStatsRepository;
pub use transaction::PgTransactionRepository;
pub use user::PgUserRepository;
