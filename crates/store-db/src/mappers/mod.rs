//! Entity to model mappers
//!
//! Conversions from database models to domain entities (store-core).
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database inserts

mod bot;
mod category;
mod product;
mod stats;
mod transaction;
mod user;

pub use product::{group_accounts, product_with_accounts};
pub use transaction::TransactionInsert;
