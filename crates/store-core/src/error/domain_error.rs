//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Bot not found: {0}")]
    BotNotFound(i64),

    #[error("Product not found: {product_id}")]
    ProductNotFound { bot_id: i64, product_id: String },

    #[error("Category not found: {name}")]
    CategoryNotFound { bot_id: i64, name: String },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("User already exists: {0}")]
    UserAlreadyExists(i64),

    #[error("Bot already exists: {0}")]
    BotAlreadyExists(i64),

    #[error("Product id already in use: {0}")]
    ProductAlreadyExists(String),

    #[error("Category already exists: {0}")]
    CategoryAlreadyExists(String),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: i64,
        available: i64,
    },

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: i64, available: i64 },

    #[error("User is banned: {0}")]
    UserBanned(i64),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::BotNotFound(_) => "UNKNOWN_BOT",
            Self::ProductNotFound { .. } => "UNKNOWN_PRODUCT",
            Self::CategoryNotFound { .. } => "UNKNOWN_CATEGORY",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Conflict
            Self::UserAlreadyExists(_) => "USER_ALREADY_EXISTS",
            Self::BotAlreadyExists(_) => "BOT_ALREADY_EXISTS",
            Self::ProductAlreadyExists(_) => "PRODUCT_ALREADY_EXISTS",
            Self::CategoryAlreadyExists(_) => "CATEGORY_ALREADY_EXISTS",

            // Business Rules
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::UserBanned(_) => "USER_BANNED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::BotNotFound(_)
                | Self::ProductNotFound { .. }
                | Self::CategoryNotFound { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UserAlreadyExists(_)
                | Self::BotAlreadyExists(_)
                | Self::ProductAlreadyExists(_)
                | Self::CategoryAlreadyExists(_)
        )
    }

    /// Check if this is a business rule violation
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::InsufficientStock { .. } | Self::InsufficientBalance { .. } | Self::UserBanned(_)
        )
    }
}
