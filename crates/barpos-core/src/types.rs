//! # Domain Types
//!
//! Core domain types used throughout Bar POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────────┐  │
//! │  │      Item       │   │    CartLine     │   │     Transaction      │  │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────────  │  │
//! │  │  id (UUID)      │◄──│  item_id        │   │  id (UUID)           │  │
//! │  │  name           │   │  quantity       │   │  lines ──────────┐   │  │
//! │  │  price_cents    │   └─────────────────┘   │  total_cents     │   │  │
//! │  │  stock          │                         │  timestamp       │   │  │
//! │  └─────────────────┘                         └──────────────────┼───┘  │
//! │           │ copied at checkout                                  ▼      │
//! │           └──────────────────────────────────► TransactionLine         │
//! │                                                (name, category, price) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Item
// =============================================================================

/// A sellable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Unique identifier (UUID v4). Never changes.
    pub id: String,

    /// Display name shown on the sell screen and in the history.
    pub name: String,

    /// Price in cents.
    pub price_cents: i64,

    /// Picture shown on the item's tile. May be empty.
    pub image_url: String,

    /// Grouping such as "Beer", "Wine" or "Spirits".
    pub category: String,

    pub description: String,

    /// Units on hand.
    pub stock: i64,
}

impl Item {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether `quantity` units can be sold from current stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// New Item (form input)
// =============================================================================

/// Raw inventory form fields for an item being added.
///
/// Price and stock arrive as the text the bartender typed; they are parsed
/// when the item is added to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewItem {
    pub name: String,
    /// Decimal price text, e.g. "5" or "4.50".
    pub price: String,
    pub image_url: String,
    pub category: String,
    pub description: String,
    /// Whole-number stock text, e.g. "100".
    pub stock: String,
}

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the sale in progress.
///
/// Only the item id is held; name and price are read from the catalog until
/// checkout freezes them into a [`TransactionLine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub item_id: String,
    /// Always > 0 while the line exists.
    pub quantity: i64,
}

// =============================================================================
// Transaction Line
// =============================================================================

/// A line of a completed sale.
/// Uses snapshot pattern to freeze item data at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionLine {
    pub item_id: String,
    /// Item name at time of sale (frozen).
    pub name: String,
    /// Item category at time of sale (frozen).
    pub category: String,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    pub quantity: i64,
}

impl TransactionLine {
    /// Freezes the item's current name, category and price.
    pub fn snapshot(item: &Item, quantity: i64) -> Self {
        TransactionLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            unit_price_cents: item.price_cents,
            quantity,
        }
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total (unit price × quantity).
    ///
    /// Lines of a recorded transaction always fit, since their sum was
    /// checked when the transaction was built.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().saturating_multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// An immutable record of a completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    pub id: String,
    pub lines: Vec<TransactionLine>,
    /// Sum of the line totals, fixed at creation.
    pub total_cents: i64,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Builds a transaction and computes its total from the lines.
    ///
    /// ## Errors
    /// `CoreError::AmountOverflow` if a line total or the sum does not fit.
    pub fn new(
        id: impl Into<String>,
        lines: Vec<TransactionLine>,
        timestamp: DateTime<Utc>,
    ) -> CoreResult<Self> {
        let line_totals = lines
            .iter()
            .map(|l| l.unit_price().checked_multiply_quantity(l.quantity))
            .collect::<Option<Vec<Money>>>()
            .ok_or(CoreError::AmountOverflow)?;
        let total = Money::checked_sum(line_totals).ok_or(CoreError::AmountOverflow)?;

        Ok(Transaction {
            id: id.into(),
            lines,
            total_cents: total.cents(),
            timestamp,
        })
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Total units sold across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
