//! User entity <-> model mapper

use store_core::entities::User;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            name: model.name,
            role: model.role,
            balance: model.balance,
            transaction_count: model.transaction_count,
            purchased_count: model.purchased_count,
            total_spent: model.total_spent,
            is_telegram: model.is_telegram,
            banned: model.banned,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
