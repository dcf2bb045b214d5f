//! Storefront services
//!
//! Each service borrows the shared [`ServiceContext`] and turns validated
//! query DTOs into repository calls.

pub mod bot;
pub mod category;
pub mod context;
pub mod error;
pub mod health;
pub mod product;
pub mod stats;
pub mod transaction;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use bot::BotService;
pub use category::CategoryService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use health::HealthService;
pub use product::ProductService;
pub use stats::StatsService;
pub use store_core::entities::ProductEdit;
pub use transaction::TransactionService;
pub use user::UserService;
