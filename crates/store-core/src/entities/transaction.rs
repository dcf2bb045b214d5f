//! Transaction entity - an immutable purchase history record

use chrono::{DateTime, Utc};

use super::product::ensure_take_quantity;
use crate::error::DomainError;

/// Transaction entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub bot_id: i64,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    /// Unit price in minor units
    pub price: i64,
    /// Always `price * quantity`
    pub total_amount: i64,
    pub status: String,
    pub accounts: Vec<String>,
    pub payment_method: String,
    pub terms: String,
    /// External payment reference
    pub reference_id: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub const STATUS_COMPLETED: &'static str = "completed";
    pub const PAYMENT_BALANCE: &'static str = "balance";

    /// Check if the transaction counts toward aggregations
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == Self::STATUS_COMPLETED
    }
}

/// A transaction to be written, before it has an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub user_id: i64,
    pub bot_id: i64,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub price: i64,
    pub status: String,
    pub accounts: Vec<String>,
    pub payment_method: String,
    pub terms: String,
    pub reference_id: String,
}

impl NewTransaction {
    /// Create a completed, balance-paid record for one unit
    pub fn new(
        user_id: i64,
        bot_id: i64,
        product_id: String,
        product_name: String,
        price: i64,
    ) -> Self {
        Self {
            user_id,
            bot_id,
            product_id,
            product_name,
            quantity: 1,
            price,
            status: Transaction::STATUS_COMPLETED.to_string(),
            accounts: Vec::new(),
            payment_method: Transaction::PAYMENT_BALANCE.to_string(),
            terms: String::new(),
            reference_id: String::new(),
        }
    }

    /// Computed total: `price * quantity`
    pub fn total_amount(&self) -> i64 {
        self.price.saturating_mul(self.quantity)
    }
}

/// Input of the single-commit purchase operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub bot_id: i64,
    pub product_id: String,
    pub user_id: i64,
    pub quantity: i64,
    pub payment_method: String,
    pub reference_id: String,
}

impl Purchase {
    pub fn new(bot_id: i64, product_id: String, user_id: i64, quantity: i64) -> Self {
        Self {
            bot_id,
            product_id,
            user_id,
            quantity,
            payment_method: Transaction::PAYMENT_BALANCE.to_string(),
            reference_id: String::new(),
        }
    }

    /// Validate the purchase before touching storage
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_take_quantity(self.quantity)?;
        if self.product_id.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "productId is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the buyer's balance is debited
    #[inline]
    pub fn pays_with_balance(&self) -> bool {
        self.payment_method == Transaction::PAYMENT_BALANCE
    }
}

/// Result of a committed purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub transaction: Transaction,
    /// Stock left in the pool after the take
    pub remaining_stock: i64,
    /// Buyer's balance after the debit
    pub balance: i64,
}
