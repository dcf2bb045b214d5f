//! Transaction entity <-> model mapper

use store_core::entities::{NewTransaction, Transaction};

use crate::models::TransactionModel;

/// Convert TransactionModel to Transaction entity
impl From<TransactionModel> for Transaction {
    fn from(model: TransactionModel) -> Self {
        Transaction {
            id: model.id,
            user_id: model.user_id,
            bot_id: model.bot_id,
            product_id: model.product_id,
            product_name: model.product_name,
            quantity: model.quantity,
            price: model.price,
            total_amount: model.total_amount,
            status: model.status,
            accounts: model.accounts,
            payment_method: model.payment_method,
            terms: model.terms,
            reference_id: model.reference_id,
            created_at: model.created_at,
        }
    }
}

/// Values for inserting a history record, with the total already computed
pub struct TransactionInsert<'a> {
    pub user_id: i64,
    pub bot_id: i64,
    pub product_id: &'a str,
    pub product_name: &'a str,
    pub quantity: i64,
    pub price: i64,
    pub total_amount: i64,
    pub status: &'a str,
    pub accounts: &'a [String],
    pub payment_method: &'a str,
    pub terms: &'a str,
    pub reference_id: &'a str,
}

impl<'a> TransactionInsert<'a> {
    pub fn new(tx: &'a NewTransaction) -> Self {
        Self {
            user_id: tx.user_id,
            bot_id: tx.bot_id,
            product_id: &tx.product_id,
            product_name: &tx.product_name,
            quantity: tx.quantity,
            price: tx.price,
            total_amount: tx.total_amount(),
            status: &tx.status,
            accounts: &tx.accounts,
            payment_method: &tx.payment_method,
            terms: &tx.terms,
            reference_id: &tx.reference_id,
        }
    }
}
