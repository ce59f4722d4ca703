//! # barpos-core: Pure Business Logic for Bar POS
//!
//! Everything the register does to its in-memory state lives here, as plain
//! data types and deterministic transitions. No I/O, no clock reads: ids and
//! timestamps arrive inside [`state::Action`] values.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bar POS Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Front end: Sell / Inventory / History views           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            Register commands (apps/register)                    │   │
//! │  │    add_to_cart, checkout, set_stock, export_transactions ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ barpos-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌────────┐ ┌────────┐ ┌───────────┐  │   │
//! │  │   │ catalog │ │  cart   │ │ ledger │ │ state  │ │ validation│  │   │
//! │  │   │  Item   │ │CartLine │ │ Trans- │ │ apply()│ │  parsing  │  │   │
//! │  │   │  seed   │ │ total   │ │ action │ │ Action │ │   rules   │  │   │
//! │  │   └─────────┘ └─────────┘ └────────┘ └────────┘ └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer-cent money type
//! - [`types`] - Item, cart line and transaction records
//! - [`catalog`] - Item catalog and seed data
//! - [`cart`] - Sale in progress
//! - [`ledger`] - Transaction history and export selection
//! - [`state`] - `PosState` and the pure `apply` reducer
//! - [`validation`] - Form input parsing and business rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use barpos_core::state::{apply, Action, PosState};
//! use chrono::Utc;
//! use uuid::Uuid;
//!
//! let state = PosState::seeded();
//! let beer = state.catalog().find_by_name("Beer").unwrap().id.clone();
//!
//! let state = apply(&state, Action::AddToCart { item_id: beer.clone() }).unwrap();
//! let state = apply(&state, Action::AddToCart { item_id: beer.clone() }).unwrap();
//! let state = apply(
//!     &state,
//!     Action::Checkout { transaction_id: Uuid::new_v4(), at: Utc::now() },
//! )
//! .unwrap();
//!
//! assert_eq!(state.catalog().get(&beer).unwrap().stock, 98);
//! assert_eq!(state.ledger().latest().unwrap().total().cents(), 1000);
//! assert!(state.cart().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod money;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, PricedLine};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{ExportScope, Ledger, Selection};
pub use money::Money;
pub use state::{apply, Action, PosState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level every seeded item starts with.
pub const SEED_STOCK: i64 = 100;

/// Most units of one item a single cart line may hold.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Longest accepted item name.
pub const MAX_NAME_LEN: usize = 200;

/// Longest accepted search query in the sell view.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;
