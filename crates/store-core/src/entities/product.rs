//! Product entity - a sellable item in a bot's catalog with its inventory pool

use crate::error::DomainError;

/// Product entity
///
/// The `accounts` vector is the inventory pool, oldest entry first.
/// Its length is the available stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub bot_id: i64,
    pub id: String,
    pub name: String,
    /// Unit price in minor units
    pub price: i64,
    pub description: String,
    /// Terms and conditions shown to the buyer
    pub terms: String,
    pub sold: i64,
    pub accounts: Vec<String>,
}

impl Product {
    /// Create a new Product with an empty pool
    pub fn new(bot_id: i64, id: String, name: String, price: i64) -> Self {
        Self {
            bot_id,
            id,
            name,
            price,
            description: String::new(),
            terms: String::new(),
            sold: 0,
            accounts: Vec::new(),
        }
    }

    /// Available stock
    #[inline]
    pub fn stock(&self) -> usize {
        self.accounts.len()
    }

    /// First `count` accounts without removing them. Short pools return what exists.
    pub fn peek_accounts(&self, count: usize) -> &[String] {
        &self.accounts[..count.min(self.accounts.len())]
    }

    /// Remove the first `count` accounts (FIFO)
    ///
    /// The pool is left untouched when it holds fewer than `count` entries.
    pub fn take_accounts(&mut self, count: usize) -> Result<Vec<String>, DomainError> {
        ensure_take_quantity(count as i64)?;
        if self.accounts.len() < count {
            return Err(DomainError::InsufficientStock {
                product_id: self.id.clone(),
                requested: count as i64,
                available: self.accounts.len() as i64,
            });
        }
        Ok(self.accounts.drain(..count).collect())
    }

    /// Append accounts to the end of the pool
    pub fn add_accounts<I>(&mut self, accounts: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.accounts.extend(accounts);
    }

    /// Total price for `quantity` units
    pub fn total_for(&self, quantity: i64) -> i64 {
        self.price.saturating_mul(quantity)
    }
}

/// A single-field product edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductEdit {
    Name(String),
    Price(i64),
    Description(String),
    Terms(String),
}

impl ProductEdit {
    /// Write the edited field onto `product`
    pub fn apply(self, product: &mut Product) {
        match self {
            Self::Name(name) => product.name = name,
            Self::Price(price) => product.price = price,
            Self::Description(description) => product.description = description,
            Self::Terms(terms) => product.terms = terms,
        }
    }
}

/// Reject non-positive take quantities
pub(crate) fn ensure_take_quantity(quantity: i64) -> Result<(), DomainError> {
    if quantity < 1 {
        return Err(DomainError::ValidationError(
            "Quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Catalog listing entry: a product without its pool, but with its depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub description: String,
    pub terms: String,
    pub stock: i64,
    pub sold: i64,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            terms: product.terms.clone(),
            stock: product.stock() as i64,
            sold: product.sold,
        }
    }
}
