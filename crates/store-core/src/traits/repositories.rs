//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Counter updates are expressed as deltas so
//! implementations can apply them as single atomic increments.

use async_trait::async_trait;

use crate::entities::{
    Bot, BotCatalog, BotCounterDelta, Category, DateRange, NewTransaction, Product, ProductEdit, ProductSales,
    ProductSummary, Purchase, PurchaseReceipt, Transaction, User, UserCounterDelta,
};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Check if a user exists
    async fn exists(&self, id: i64) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// List all users
    async fn find_all(&self) -> RepoResult<Vec<User>>;

    /// List users linked to telegram
    async fn find_telegram(&self) -> RepoResult<Vec<User>>;

    /// Atomically add `amount` (may be negative) to the balance
    async fn add_balance(&self, id: i64, amount: i64) -> RepoResult<User>;

    /// Set the role
    async fn set_role(&self, id: i64, role: &str) -> RepoResult<User>;

    /// Set the banned flag
    async fn set_banned(&self, id: i64, banned: bool) -> RepoResult<User>;

    /// Atomically increment the purchase counters
    async fn add_counters(&self, id: i64, delta: UserCounterDelta) -> RepoResult<User>;

    /// Delete a user
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Total number of users
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Bot Repository
// ============================================================================

#[async_trait]
pub trait BotRepository: Send + Sync {
    /// Find bot by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Bot>>;

    /// Check if a bot exists
    async fn exists(&self, id: i64) -> RepoResult<bool>;

    /// Create a new bot
    async fn create(&self, bot: &Bot) -> RepoResult<()>;

    /// Load a bot with its products and categories
    async fn find_catalog(&self, id: i64) -> RepoResult<Option<BotCatalog>>;

    /// Atomically increment the bot's counters
    async fn apply_counters(&self, id: i64, delta: BotCounterDelta) -> RepoResult<Bot>;

    /// Zero the daily counters
    async fn reset_today(&self, id: i64) -> RepoResult<Bot>;
}

// ============================================================================
// Product Repository
// ============================================================================

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find a product with its full pool
    async fn find(&self, bot_id: i64, product_id: &str) -> RepoResult<Option<Product>>;

    /// List a bot's products with stock depth
    async fn find_by_bot(&self, bot_id: i64) -> RepoResult<Vec<ProductSummary>>;

    /// Create a new product
    async fn create(&self, product: &Product) -> RepoResult<()>;

    /// Write one descriptive field in place and return the product
    async fn update_field(&self, bot_id: i64, product_id: &str, edit: ProductEdit)
        -> RepoResult<Product>;

    /// Change a product's id, carrying its pool along
    async fn change_id(&self, bot_id: i64, old_id: &str, new_id: &str) -> RepoResult<Product>;

    /// Delete a product and its pool
    async fn delete(&self, bot_id: i64, product_id: &str) -> RepoResult<()>;

    /// Append accounts to the pool, returning the new stock depth
    async fn add_accounts(&self, bot_id: i64, product_id: &str, accounts: &[String])
        -> RepoResult<i64>;

    /// First `limit` accounts without removing them
    async fn peek_accounts(&self, bot_id: i64, product_id: &str, limit: i64)
        -> RepoResult<Vec<String>>;

    /// Remove and return the first `quantity` accounts (FIFO)
    async fn take_accounts(&self, bot_id: i64, product_id: &str, quantity: i64)
        -> RepoResult<Vec<String>>;

    /// Increment product and bot sold counters together
    async fn add_sold(&self, bot_id: i64, product_id: &str, quantity: i64) -> RepoResult<Product>;

    /// Number of products a bot has
    async fn count_by_bot(&self, bot_id: i64) -> RepoResult<i64>;
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List a bot's categories, ordered by name
    async fn find_by_bot(&self, bot_id: i64) -> RepoResult<Vec<Category>>;

    /// Find a category by name
    async fn find(&self, bot_id: i64, name: &str) -> RepoResult<Option<Category>>;

    /// Create a new category
    async fn create(&self, category: &Category) -> RepoResult<()>;

    /// Replace the product ids
    async fn replace(&self, bot_id: i64, name: &str, product_ids: &[String])
        -> RepoResult<Category>;

    /// Append product ids
    async fn append(&self, bot_id: i64, name: &str, product_ids: &[String])
        -> RepoResult<Category>;

    /// Delete a category
    async fn delete(&self, bot_id: i64, name: &str) -> RepoResult<()>;
}

// ============================================================================
// Transaction Repository
// ============================================================================

/// Pagination options for history queries, newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryQuery {
    pub limit: i64,
    pub skip: i64,
}

impl HistoryQuery {
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;

    /// Build a query, clamping `limit` to `1..=100` and `skip` to `>= 0`
    pub fn new(limit: Option<i64>, skip: Option<i64>) -> Self {
        Self {
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
            skip: skip.unwrap_or(0).max(0),
        }
    }

    /// The latest `MAX_LIMIT` records
    pub fn latest() -> Self {
        Self {
            limit: Self::MAX_LIMIT,
            skip: 0,
        }
    }
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Append a history record
    async fn create(&self, transaction: &NewTransaction) -> RepoResult<Transaction>;

    /// A user's history, newest first
    async fn find_by_user(&self, user_id: i64, query: HistoryQuery)
        -> RepoResult<Vec<Transaction>>;

    /// A bot's history, newest first
    async fn find_by_bot(&self, bot_id: i64, query: HistoryQuery) -> RepoResult<Vec<Transaction>>;

    /// Number of records for a bot, any status
    async fn count_by_bot(&self, bot_id: i64) -> RepoResult<i64>;
}

// ============================================================================
// Sales Repository
// ============================================================================

/// Operations spanning several tables under one commit boundary
#[async_trait]
pub trait SalesRepository: Send + Sync {
    /// Book a sale on the product (if present) and bot counters
    async fn record_sale(
        &self,
        bot_id: i64,
        product_id: &str,
        quantity: i64,
        final_price: i64,
    ) -> RepoResult<Bot>;

    /// Take stock, update counters, debit the buyer and write history
    async fn purchase(&self, purchase: &Purchase) -> RepoResult<PurchaseReceipt>;
}

// ============================================================================
// Stats Repository
// ============================================================================

/// Read-only reductions over completed transactions
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Units and revenue per product id, most units first
    async fn sales_per_product(&self, bot_id: Option<i64>) -> RepoResult<Vec<ProductSales>>;

    /// Revenue over all bots
    async fn total_revenue(&self) -> RepoResult<i64>;

    /// Revenue within an inclusive window
    async fn revenue_between(&self, range: DateRange) -> RepoResult<i64>;

    /// Units over all bots
    async fn total_units(&self) -> RepoResult<i64>;

    /// Units sold for a product id, across bots
    async fn units_for_product(&self, product_id: &str) -> RepoResult<i64>;
}
