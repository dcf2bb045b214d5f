//! Category and product-view handlers
//!
//! A product view is a category addressed by its title.

use std::collections::BTreeMap;

use axum::extract::State;
use store_service::dto::{
    BotIdQuery, CategoryQuery, CategoryResponse, ProductViewQuery, ProductViewResponse,
};
use store_service::CategoryService;

use crate::extractors::ValidatedQuery;
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// GET /api/category/list?botId
pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<BotIdQuery>,
) -> ApiResult<ApiJson<BTreeMap<String, Vec<String>>>> {
    let categories = CategoryService::new(state.service_context())
        .list(query.bot_id)
        .await?;
    Ok(ApiJson::ok(categories))
}

/// GET /api/category/add?botId&categoryName&productIds
pub async fn add(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CategoryQuery>,
) -> ApiResult<Created<ApiJson<CategoryResponse>>> {
    let category = CategoryService::new(state.service_context()).add(query).await?;
    Ok(Created(ApiJson::ok(category)))
}

/// GET /api/category/update?botId&categoryName&productIds
pub async fn update(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CategoryQuery>,
) -> ApiResult<ApiJson<CategoryResponse>> {
    let category = CategoryService::new(state.service_context())
        .update(query)
        .await?;
    Ok(ApiJson::ok(category))
}

/// GET /api/category/delete?botId&categoryName
pub async fn delete(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CategoryQuery>,
) -> ApiResult<ApiJson<()>> {
    CategoryService::new(state.service_context())
        .delete(query.bot_id, &query.category_name)
        .await?;
    Ok(ApiJson::ok(()).with_message("Category deleted"))
}

/// GET /api/product/view/create?botId&title
pub async fn create_view(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ProductViewQuery>,
) -> ApiResult<ApiJson<ProductViewResponse>> {
    let view = CategoryService::new(state.service_context())
        .create_view(query.bot_id, &query.title)
        .await?;
    Ok(ApiJson::ok(view))
}

/// GET /api/product/view/add?botId&title&accounts
pub async fn add_to_view(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ProductViewQuery>,
) -> ApiResult<ApiJson<CategoryResponse>> {
    let category = CategoryService::new(state.service_context())
        .append_view(query)
        .await?;
    Ok(ApiJson::ok(category))
}
