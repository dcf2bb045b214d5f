//! Bot entity - a storefront tenant with its own catalog and sales counters

use chrono::{DateTime, Utc};

use super::{Category, Product};

/// Bot entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bot {
    pub id: i64,
    pub name: String,
    /// Lifetime units sold
    pub sold: i64,
    /// Lifetime number of transactions
    pub transaction_count: i64,
    pub sold_today: i64,
    pub transactions_today: i64,
    /// Lifetime revenue in minor units
    pub revenue: i64,
    pub revenue_today: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bot {
    /// Create a new Bot with zeroed counters
    pub fn new(id: i64, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            sold: 0,
            transaction_count: 0,
            sold_today: 0,
            transactions_today: 0,
            revenue: 0,
            revenue_today: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a counter delta in memory (mirrors the SQL increment)
    pub fn apply(&mut self, delta: &BotCounterDelta) {
        self.sold += delta.sold;
        self.transaction_count += delta.transactions;
        self.sold_today += delta.sold_today;
        self.transactions_today += delta.transactions_today;
        self.revenue += delta.revenue;
        self.revenue_today += delta.revenue_today;
        self.updated_at = Utc::now();
    }
}

/// A bot together with its products and categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotCatalog {
    pub bot: Bot,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

/// Increments applied to a bot's counters in one atomic statement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BotCounterDelta {
    pub transactions: i64,
    pub sold: i64,
    pub sold_today: i64,
    pub transactions_today: i64,
    pub revenue: i64,
    pub revenue_today: i64,
}

impl BotCounterDelta {
    /// Units sold and revenue booked by a sale, lifetime and today
    pub fn sale(quantity: i64, amount: i64) -> Self {
        Self {
            sold: quantity,
            sold_today: quantity,
            revenue: amount,
            revenue_today: amount,
            ..Self::default()
        }
    }

    /// Transaction count and revenue only
    pub fn transactions(count: i64, amount: i64) -> Self {
        Self {
            transactions: count,
            revenue: amount,
            ..Self::default()
        }
    }

    /// Units sold (lifetime) only
    pub fn sold(quantity: i64) -> Self {
        Self {
            sold: quantity,
            ..Self::default()
        }
    }

    /// Full purchase: a sale plus one transaction, lifetime and today
    pub fn purchase(quantity: i64, amount: i64) -> Self {
        Self {
            transactions: 1,
            transactions_today: 1,
            ..Self::sale(quantity, amount)
        }
    }
}
