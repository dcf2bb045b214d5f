//! User service
//!
//! Handles customer accounts: registration, balance, role and counters.

use store_core::entities::{User, UserCounterDelta};
use tracing::{info, instrument};

use crate::dto::{RegisterUserQuery, UserResponse, UserTransactionQuery};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user; fails if the id is taken
    #[instrument(skip(self))]
    pub async fn register(&self, request: RegisterUserQuery) -> ServiceResult<UserResponse> {
        let user = User::new(request.id, request.name);
        self.ctx.user_repo().create(&user).await?;

        info!(user_id = %user.id, "User registered");
        Ok(UserResponse::from(&user))
    }

    #[instrument(skip(self))]
    pub async fn exists(&self, user_id: i64) -> ServiceResult<bool> {
        Ok(self.ctx.user_repo().exists(user_id).await?)
    }

    /// Get a user, or `None` when unknown
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: i64) -> ServiceResult<Option<UserResponse>> {
        let user = self.ctx.user_repo().find_by_id(user_id).await?;
        Ok(user.map(UserResponse::from))
    }

    /// Add `amount` to the balance; negative amounts debit
    #[instrument(skip(self))]
    pub async fn edit_balance(&self, user_id: i64, amount: i64) -> ServiceResult<UserResponse> {
        let user = self.ctx.user_repo().add_balance(user_id, amount).await?;

        info!(user_id = %user_id, amount, balance = user.balance, "Balance changed");
        Ok(UserResponse::from(user))
    }

    #[instrument(skip(self))]
    pub async fn edit_role(&self, user_id: i64, role: &str) -> ServiceResult<UserResponse> {
        let user = self.ctx.user_repo().set_role(user_id, role).await?;

        info!(user_id = %user_id, role, "Role changed");
        Ok(UserResponse::from(user))
    }

    #[instrument(skip(self))]
    pub async fn set_banned(&self, user_id: i64, banned: bool) -> ServiceResult<UserResponse> {
        let user = self.ctx.user_repo().set_banned(user_id, banned).await?;

        info!(user_id = %user_id, banned, "Ban flag changed");
        Ok(UserResponse::from(user))
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn telegram_users(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().find_telegram().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Delete a user; their transaction history is kept
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: i64) -> ServiceResult<()> {
        self.ctx.user_repo().delete(user_id).await?;

        info!(user_id = %user_id, "User deleted");
        Ok(())
    }

    /// Increment the purchase counters
    #[instrument(skip(self))]
    pub async fn add_transaction(&self, request: UserTransactionQuery) -> ServiceResult<UserResponse> {
        let delta = UserCounterDelta {
            transactions: request.total_transaksi,
            purchased: request.total_membeli,
            spent: request.nominal,
        };
        let user = self.ctx.user_repo().add_counters(request.user_id, delta).await?;

        info!(user_id = %request.user_id, ?delta, "User counters updated");
        Ok(UserResponse::from(user))
    }
}
