//! Bot handlers

use axum::extract::State;
use store_service::dto::{
    AddBotTransactionQuery, BotDetailResponse, BotResponse, CreateBotQuery, IdQuery,
};
use store_service::BotService;

use crate::extractors::ValidatedQuery;
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// GET /api/bot/check?id
pub async fn check(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> ApiResult<ApiJson<bool>> {
    let exists = BotService::new(state.service_context()).exists(query.id).await?;
    Ok(ApiJson::ok(exists))
}

/// GET /api/bot/create?id&name
pub async fn create(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CreateBotQuery>,
) -> ApiResult<Created<ApiJson<BotResponse>>> {
    let bot = BotService::new(state.service_context()).create_bot(query).await?;
    Ok(Created(ApiJson::ok(bot)))
}

/// GET /api/bot/detail?id
///
/// The bot with its products and categories keyed by id and name, or
/// `null` when unknown.
pub async fn detail(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> ApiResult<ApiJson<Option<BotDetailResponse>>> {
    let bot = BotService::new(state.service_context()).get_bot(query.id).await?;
    Ok(ApiJson::ok(bot))
}

/// GET /api/bot/reset-today?id
pub async fn reset_today(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> ApiResult<ApiJson<BotResponse>> {
    let bot = BotService::new(state.service_context()).reset_today(query.id).await?;
    Ok(ApiJson::ok(bot))
}

/// GET /api/stats/add-bot-trx?botId&totalTransaksi&totalNominal
pub async fn add_transaction(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AddBotTransactionQuery>,
) -> ApiResult<ApiJson<BotResponse>> {
    let bot = BotService::new(state.service_context())
        .add_transaction(query)
        .await?;
    Ok(ApiJson::ok(bot))
}
