//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use store_core::entities::{
    AdminStats, Bot, BotCatalog, BotTotals, Category, Product, ProductSales, ProductSummary,
    PublicStats, PurchaseReceipt, Transaction, User,
};

use super::responses::{
    AdminStatsResponse, BotDetailResponse, BotResponse, BotTotalsResponse, CategoryResponse,
    ProductResponse, ProductSalesResponse, ProductSummaryResponse, PublicStatsResponse,
    PurchaseResponse, TransactionResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            role: user.role.clone(),
            balance: user.balance,
            transaction_count: user.transaction_count,
            purchased_count: user.purchased_count,
            total_spent: user.total_spent,
            is_telegram: user.is_telegram,
            banned: user.banned,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Bot Mappers
// ============================================================================

impl From<&Bot> for BotResponse {
    fn from(bot: &Bot) -> Self {
        Self {
            id: bot.id,
            name: bot.name.clone(),
            sold: bot.sold,
            transaction_count: bot.transaction_count,
            sold_today: bot.sold_today,
            transactions_today: bot.transactions_today,
            revenue: bot.revenue,
            revenue_today: bot.revenue_today,
            created_at: bot.created_at,
            updated_at: bot.updated_at,
        }
    }
}

impl From<Bot> for BotResponse {
    fn from(bot: Bot) -> Self {
        Self::from(&bot)
    }
}

impl From<BotCatalog> for BotDetailResponse {
    fn from(catalog: BotCatalog) -> Self {
        Self {
            bot: BotResponse::from(&catalog.bot),
            product: catalog
                .products
                .into_iter()
                .map(|p| (p.id.clone(), ProductResponse::from(p)))
                .collect(),
            product_view: catalog
                .categories
                .into_iter()
                .map(|c| (c.name.clone(), CategoryResponse::from(c)))
                .collect(),
        }
    }
}

// ============================================================================
// Product Mappers
// ============================================================================

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            desc: product.description,
            snk: product.terms,
            terjual: product.sold,
            account: product.accounts,
        }
    }
}

impl From<ProductSummary> for ProductSummaryResponse {
    fn from(summary: ProductSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            price: summary.price,
            desc: summary.description,
            snk: summary.terms,
            stock: summary.stock,
            terjual: summary.sold,
        }
    }
}

// ============================================================================
// Category Mappers
// ============================================================================

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.product_ids,
        }
    }
}

// ============================================================================
// Transaction Mappers
// ============================================================================

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            user_id: tx.user_id,
            bot_id: tx.bot_id,
            product_id: tx.product_id,
            product_name: tx.product_name,
            quantity: tx.quantity,
            price: tx.price,
            total_amount: tx.total_amount,
            status: tx.status,
            accounts: tx.accounts,
            payment_method: tx.payment_method,
            snk: tx.terms,
            reff_id: tx.reference_id,
            created_at: tx.created_at,
        }
    }
}

impl From<PurchaseReceipt> for PurchaseResponse {
    fn from(receipt: PurchaseReceipt) -> Self {
        Self {
            accounts: receipt.transaction.accounts.clone(),
            transaction: TransactionResponse::from(receipt.transaction),
            remaining_stock: receipt.remaining_stock,
            balance: receipt.balance,
        }
    }
}

// ============================================================================
// Stats Mappers
// ============================================================================

impl From<AdminStats> for AdminStatsResponse {
    fn from(stats: AdminStats) -> Self {
        Self {
            total_users: stats.total_users,
            total_transactions: stats.total_transactions,
            total_products: stats.total_products,
            total_revenue: stats.total_revenue,
            total_products_sold: stats.total_products_sold,
        }
    }
}

impl From<PublicStats> for PublicStatsResponse {
    fn from(stats: PublicStats) -> Self {
        Self {
            total_revenue: stats.total_revenue,
            total_products_sold: stats.total_products_sold,
        }
    }
}

impl From<BotTotals> for BotTotalsResponse {
    fn from(totals: BotTotals) -> Self {
        Self {
            total_pcs: totals.total_units,
            total_pendapatan: totals.total_revenue,
        }
    }
}

impl From<ProductSales> for ProductSalesResponse {
    fn from(sales: ProductSales) -> Self {
        Self {
            product_id: sales.product_id,
            product_name: sales.product_name,
            total_pcs: sales.total_units,
            total_revenue: sales.total_revenue,
        }
    }
}
