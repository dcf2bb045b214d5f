//! Database models - SQLx-compatible structs for PostgreSQL tables

mod bot;
mod category;
mod product;
mod stats;
mod transaction;
mod user;

pub use bot::BotModel;
pub use category::CategoryModel;
pub use product::{ProductAccountModel, ProductModel, ProductSummaryModel};
pub use stats::ProductSalesModel;
pub use transaction::TransactionModel;
pub use user::UserModel;
