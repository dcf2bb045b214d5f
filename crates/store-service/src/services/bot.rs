//! Bot service
//!
//! Storefront tenants: creation, catalog lookup and counter maintenance.

use store_core::entities::{Bot, BotCounterDelta};
use store_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{AddBotTransactionQuery, BotDetailResponse, BotResponse, CreateBotQuery};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Load a bot or fail with `UNKNOWN_BOT`
pub(crate) async fn require_bot(ctx: &ServiceContext, bot_id: i64) -> ServiceResult<Bot> {
    ctx.bot_repo()
        .find_by_id(bot_id)
        .await?
        .ok_or_else(|| DomainError::BotNotFound(bot_id).into())
}

/// Bot service
pub struct BotService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BotService<'a> {
    /// Create a new BotService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn exists(&self, bot_id: i64) -> ServiceResult<bool> {
        Ok(self.ctx.bot_repo().exists(bot_id).await?)
    }

    /// Create a bot with zeroed counters and an empty catalog
    #[instrument(skip(self))]
    pub async fn create_bot(&self, request: CreateBotQuery) -> ServiceResult<BotResponse> {
        let bot = Bot::new(request.id, request.name);
        self.ctx.bot_repo().create(&bot).await?;

        info!(bot_id = %bot.id, name = %bot.name, "Bot created");
        Ok(BotResponse::from(&bot))
    }

    /// The bot with every product and category, or `None` when unknown
    #[instrument(skip(self))]
    pub async fn get_bot(&self, bot_id: i64) -> ServiceResult<Option<BotDetailResponse>> {
        let catalog = self.ctx.bot_repo().find_catalog(bot_id).await?;
        Ok(catalog.map(BotDetailResponse::from))
    }

    /// Zero the daily counters
    #[instrument(skip(self))]
    pub async fn reset_today(&self, bot_id: i64) -> ServiceResult<BotResponse> {
        let bot = self.ctx.bot_repo().reset_today(bot_id).await?;

        info!(bot_id = %bot_id, "Daily counters reset");
        Ok(BotResponse::from(bot))
    }

    /// Add to the lifetime transaction counter and revenue
    #[instrument(skip(self))]
    pub async fn add_transaction(&self, request: AddBotTransactionQuery) -> ServiceResult<BotResponse> {
        let delta = BotCounterDelta::transactions(request.total_transaksi, request.total_nominal);
        let bot = self
            .ctx
            .bot_repo()
            .apply_counters(request.bot_id, delta)
            .await?;

        info!(
            bot_id = %request.bot_id,
            transactions = request.total_transaksi,
            amount = request.total_nominal,
            "Bot transactions added"
        );
        Ok(BotResponse::from(bot))
    }
}
