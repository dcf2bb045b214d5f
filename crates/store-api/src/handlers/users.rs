//! User handlers
//!
//! Registration, balance and role changes, and per-user purchase counters.

use axum::extract::State;
use store_service::dto::{
    BanUserQuery, DeleteUserQuery, EditBalanceQuery, EditRoleQuery, IdQuery, RegisterUserQuery,
    UserResponse, UserTransactionQuery,
};
use store_service::UserService;

use crate::extractors::ValidatedQuery;
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// GET /api/user/register?id&name
pub async fn register(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<RegisterUserQuery>,
) -> ApiResult<Created<ApiJson<UserResponse>>> {
    let user = UserService::new(state.service_context()).register(query).await?;
    Ok(Created(ApiJson::ok(user)))
}

/// GET /api/user/check?id
pub async fn check(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> ApiResult<ApiJson<bool>> {
    let exists = UserService::new(state.service_context()).exists(query.id).await?;
    Ok(ApiJson::ok(exists))
}

/// GET /api/user/detail?id
///
/// `data` is `null` for an unknown user.
pub async fn detail(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> ApiResult<ApiJson<Option<UserResponse>>> {
    let user = UserService::new(state.service_context()).get_user(query.id).await?;
    Ok(ApiJson::ok(user))
}

/// GET /api/user/edit-balance?id&amount
pub async fn edit_balance(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<EditBalanceQuery>,
) -> ApiResult<ApiJson<UserResponse>> {
    let user = UserService::new(state.service_context())
        .edit_balance(query.id, query.amount)
        .await?;
    Ok(ApiJson::ok(user))
}

/// GET /api/user/edit-role?id&role
pub async fn edit_role(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<EditRoleQuery>,
) -> ApiResult<ApiJson<UserResponse>> {
    let user = UserService::new(state.service_context())
        .edit_role(query.id, &query.role)
        .await?;
    Ok(ApiJson::ok(user))
}

/// GET /api/user/ban?id&banned
pub async fn ban(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<BanUserQuery>,
) -> ApiResult<ApiJson<UserResponse>> {
    let user = UserService::new(state.service_context())
        .set_banned(query.id, query.banned)
        .await?;
    Ok(ApiJson::ok(user))
}

/// GET /api/user/all
pub async fn list_all(State(state): State<AppState>) -> ApiResult<ApiJson<Vec<UserResponse>>> {
    let users = UserService::new(state.service_context()).list_users().await?;
    Ok(ApiJson::ok(users))
}

/// GET /api/user/telegram
pub async fn telegram(State(state): State<AppState>) -> ApiResult<ApiJson<Vec<UserResponse>>> {
    let users = UserService::new(state.service_context()).telegram_users().await?;
    Ok(ApiJson::ok(users))
}

/// GET /api/user/delete?userId
pub async fn delete(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<DeleteUserQuery>,
) -> ApiResult<ApiJson<()>> {
    UserService::new(state.service_context())
        .delete_user(query.user_id)
        .await?;
    Ok(ApiJson::ok(()).with_message("User deleted"))
}

/// GET /api/user/add-transaction?userId&totalTransaksi&totalMembeli&nominal
pub async fn add_transaction(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<UserTransactionQuery>,
) -> ApiResult<ApiJson<UserResponse>> {
    let user = UserService::new(state.service_context())
        .add_transaction(query)
        .await?;
    Ok(ApiJson::ok(user))
}
