//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Query DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    AccountQuery, AddBotTransactionQuery, AddHistoryQuery, AddProductQuery, AddSoldQuery,
    AddStockQuery, BanUserQuery, BotHistoryQuery, BotIdQuery, CategoryQuery, CreateBotQuery,
    DeleteUserQuery, EditBalanceQuery, EditDescQuery, EditIdQuery, EditNameQuery, EditPriceQuery,
    EditRoleQuery, EditSnkQuery, IdQuery, ListParam, OptionalBotQuery, ProductData,
    ProductIdQuery, ProductQuery, ProductViewQuery, PurchaseQuery, RecordSaleQuery,
    RegisterUserQuery, RevenueDateQuery, UserHistoryQuery, UserTransactionQuery,
};

// Re-export commonly used response types
pub use responses::{
    AdminStatsResponse, ApiResponse, BannerResponse, BotDetailResponse, BotResponse,
    BotTotalsResponse, CategoryResponse, HealthChecks, HealthResponse, ProductResponse,
    ProductSalesResponse, ProductSummaryResponse, ProductViewResponse, PublicStatsResponse,
    PurchaseResponse, ReadinessResponse, StockResponse, TransactionResponse, UserResponse,
};
