//! Repository traits (ports)

mod repositories;

pub use repositories::{
    BotRepository, CategoryRepository, HistoryQuery, ProductRepository, RepoResult,
    SalesRepository, StatsRepository, TransactionRepository, UserRepository,
};
