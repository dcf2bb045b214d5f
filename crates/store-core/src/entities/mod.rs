//! Domain entities - core business objects

mod bot;
mod category;
mod product;
mod stats;
mod transaction;
mod user;

pub use bot::{Bot, BotCatalog, BotCounterDelta};
pub use category::Category;
pub use product::{Product, ProductEdit, ProductSummary};
pub use stats::{AdminStats, BotTotals, DateRange, ProductSales, PublicStats};
pub use transaction::{NewTransaction, Purchase, PurchaseReceipt, Transaction};
pub use user::{User, UserCounterDelta};
