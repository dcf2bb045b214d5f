//! # store-core
//!
//! Domain layer containing entities, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    AdminStats, Bot, BotCatalog, BotCounterDelta, BotTotals, Category, DateRange, NewTransaction,
    Product, ProductSales, ProductSummary, PublicStats, Purchase, PurchaseReceipt, Transaction,
    User, UserCounterDelta,
};
pub use error::DomainError;
pub use traits::{
    BotRepository, CategoryRepository, HistoryQuery, ProductRepository, RepoResult,
    SalesRepository, StatsRepository, TransactionRepository, UserRepository,
};
