//! Transaction service
//!
//! Sale recording, purchase history and the one-step purchase.

use store_core::entities::{NewTransaction, Purchase, Transaction};
use store_core::traits::HistoryQuery;
use tracing::{info, instrument};

use crate::dto::{
    AddHistoryQuery, BotHistoryQuery, BotResponse, PurchaseQuery, PurchaseResponse,
    RecordSaleQuery, TransactionResponse, UserHistoryQuery,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Use the given value unless it is blank
fn non_blank(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Transaction service
pub struct TransactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TransactionService<'a> {
    /// Create a new TransactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Book a sale on the bot and product counters
    #[instrument(skip(self))]
    pub async fn record_sale(&self, request: RecordSaleQuery) -> ServiceResult<BotResponse> {
        let bot = self
            .ctx
            .sales_repo()
            .record_sale(
                request.bot_id,
                &request.product_code,
                request.quantity,
                request.final_price,
            )
            .await?;
        Ok(BotResponse::from(bot))
    }

    /// Append a history record as reported by the caller
    #[instrument(skip(self, request), fields(user_id = %request.user_id, bot_id = %request.bot_id))]
    pub async fn add_history(&self, request: AddHistoryQuery) -> ServiceResult<TransactionResponse> {
        let record = NewTransaction {
            quantity: request.quantity,
            status: non_blank(request.status, Transaction::STATUS_COMPLETED),
            accounts: request.accounts.into_inner(),
            payment_method: non_blank(request.payment_method, Transaction::PAYMENT_BALANCE),
            terms: request.snk.unwrap_or_default(),
            reference_id: request.reff_id.unwrap_or_default(),
            ..NewTransaction::new(
                request.user_id,
                request.bot_id,
                request.product_id,
                request.product_name,
                request.price,
            )
        };

        let transaction = self.ctx.transaction_repo().create(&record).await?;

        info!(
            transaction_id = transaction.id,
            total = transaction.total_amount,
            status = %transaction.status,
            "Transaction recorded"
        );
        Ok(TransactionResponse::from(transaction))
    }

    /// Take stock, update counters, charge the buyer and write history
    /// under one commit
    #[instrument(skip(self))]
    pub async fn purchase(&self, request: PurchaseQuery) -> ServiceResult<PurchaseResponse> {
        let mut purchase = Purchase::new(
            request.bot_id,
            request.product_id,
            request.user_id,
            request.quantity,
        );
        purchase.payment_method = non_blank(request.payment_method, Transaction::PAYMENT_BALANCE);
        purchase.reference_id = request.reff_id.unwrap_or_default();

        let receipt = self.ctx.sales_repo().purchase(&purchase).await?;
        Ok(PurchaseResponse::from(receipt))
    }

    /// A user's history, newest first
    #[instrument(skip(self))]
    pub async fn user_history(&self, request: UserHistoryQuery) -> ServiceResult<Vec<TransactionResponse>> {
        let query = HistoryQuery::new(request.limit, request.skip);
        let history = self
            .ctx
            .transaction_repo()
            .find_by_user(request.user_id, query)
            .await?;
        Ok(history.into_iter().map(TransactionResponse::from).collect())
    }

    /// A bot's history, newest first
    #[instrument(skip(self))]
    pub async fn bot_history(&self, request: BotHistoryQuery) -> ServiceResult<Vec<TransactionResponse>> {
        let query = HistoryQuery::new(request.limit, request.skip);
        let history = self
            .ctx
            .transaction_repo()
            .find_by_bot(request.bot_id, query)
            .await?;
        Ok(history.into_iter().map(TransactionResponse::from).collect())
    }

    /// The latest hundred records of a bot
    #[instrument(skip(self))]
    pub async fn latest_for_bot(&self, bot_id: i64) -> ServiceResult<Vec<TransactionResponse>> {
        let history = self
            .ctx
            .transaction_repo()
            .find_by_bot(bot_id, HistoryQuery::latest())
            .await?;
        Ok(history.into_iter().map(TransactionResponse::from).collect())
    }
}
