//! # store-service
//!
//! Application layer containing storefront use cases, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    BotService, CategoryService, HealthService, ProductEdit, ProductService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, StatsService, TransactionService,
    UserService,
};
