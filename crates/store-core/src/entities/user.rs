//! User entity - a storefront customer, keyed by telegram id

use chrono::{DateTime, Utc};

use crate::error::DomainError;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub role: String,
    /// Spendable balance in minor units
    pub balance: i64,
    /// Number of completed purchases
    pub transaction_count: i64,
    /// Number of items bought across all purchases
    pub purchased_count: i64,
    /// Lifetime amount spent
    pub total_spent: i64,
    pub is_telegram: bool,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub const DEFAULT_NAME: &'static str = "No Name";
    pub const DEFAULT_ROLE: &'static str = "member";

    /// Create a new User with default counters
    pub fn new(id: i64, name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| Self::DEFAULT_NAME.to_string()),
            role: Self::DEFAULT_ROLE.to_string(),
            balance: 0,
            transaction_count: 0,
            purchased_count: 0,
            total_spent: 0,
            is_telegram: true,
            banned: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check that the user may spend `amount` from their balance
    pub fn ensure_can_spend(&self, amount: i64) -> Result<(), DomainError> {
        if self.banned {
            return Err(DomainError::UserBanned(self.id));
        }
        if self.balance < amount {
            return Err(DomainError::InsufficientBalance {
                required: amount,
                available: self.balance,
            });
        }
        Ok(())
    }
}

/// Increments applied to a user's purchase counters in one statement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserCounterDelta {
    pub transactions: i64,
    pub purchased: i64,
    pub spent: i64,
}

impl UserCounterDelta {
    /// Delta for a single purchase of `quantity` items costing `total`
    pub fn purchase(quantity: i64, total: i64) -> Self {
        Self {
            transactions: 1,
            purchased: quantity,
            spent: total,
        }
    }
}
