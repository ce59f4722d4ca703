//! # Error Types
//!
//! Domain-specific error types for barpos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  barpos-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  barpos-export errors (separate crate)                                 │
//! │  └── ExportError      - File output failures                           │
//! │                                                                         │
//! │  Register API errors (in app)                                          │
//! │  └── ApiError         - What the front end sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Front end              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// A transition that returns one of these leaves the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No catalog item has this id.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Checkout would take an item's stock below zero.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: Premium Spirit x5
    ///      │
    ///      ▼
    /// checkout(): stock = 3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Premium Spirit", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Sale is not recorded, cart is kept for the bartender to fix
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Checkout was requested with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A cart or sale total would not fit in the money range.
    #[error("Total is too large")]
    AmountOverflow,

    /// No ledger entry has this id.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while turning form text into domain values, before any state
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Text could not be read as the expected kind of value.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
