//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod bots;
pub mod categories;
pub mod health;
pub mod products;
pub mod stats;
pub mod transactions;
pub mod users;
