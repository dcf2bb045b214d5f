//! Bot entity <-> model mapper

use store_core::entities::Bot;

use crate::models::BotModel;

/// Convert BotModel to Bot entity
impl From<BotModel> for Bot {
    fn from(model: BotModel) -> Self {
        Bot {
            id: model.id,
            name: model.name,
            sold: model.sold,
            transaction_count: model.transaction_count,
            sold_today: model.sold_today,
            transactions_today: model.transactions_today,
            revenue: model.revenue,
            revenue_today: model.revenue_today,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
