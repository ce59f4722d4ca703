//! # Cart
//!
//! The sale in progress.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Front end action         Operation               Cart change           │
//! │  ────────────────         ─────────               ───────────           │
//! │  Tap item tile ──────────► add() ───────────────► qty += 1 or push      │
//! │  Edit quantity ──────────► set_quantity() ──────► qty = n (n ≤ 0: drop) │
//! │  Click remove ───────────► remove() ────────────► line dropped          │
//! │  Checkout / cancel ──────► clear() ─────────────► lines.clear()         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `item_id`
//! - Every line has 1 ≤ quantity ≤ `MAX_ITEM_QUANTITY`

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, Item};
use crate::validation::{validate_quantity, ValidationResult};

/// A cart line joined with its catalog item and current line total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine<'a> {
    pub item: &'a Item,
    pub quantity: i64,
    pub line_total: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Adds one unit of an item, appending a line if it is not yet present.
    ///
    /// ## Errors
    /// `OutOfRange` on `quantity` once the line already holds
    /// `MAX_ITEM_QUANTITY` units; the cart is left as it was.
    pub fn add(&mut self, item_id: &str) -> ValidationResult<()> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            validate_quantity(line.quantity + 1)?;
            line.quantity += 1;
            return Ok(());
        }

        self.lines.push(CartLine {
            item_id: item_id.to_string(),
            quantity: 1,
        });
        Ok(())
    }

    /// Removes an item's line. Removing an absent item does nothing.
    pub fn remove(&mut self, item_id: &str) {
        self.lines.retain(|l| l.item_id != item_id);
    }

    /// Sets a line's quantity.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line
    /// - `quantity > MAX_ITEM_QUANTITY`: rejected, no change
    /// - Item not in cart: no change
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) -> ValidationResult<()> {
        if quantity <= 0 {
            self.remove(item_id);
            return Ok(());
        }

        validate_quantity(quantity)?;
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Current quantity of an item, if it is in the cart.
    pub fn quantity_of(&self, item_id: &str) -> Option<i64> {
        self.lines
            .iter()
            .find(|l| l.item_id == item_id)
            .map(|l| l.quantity)
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of distinct items in the cart.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Lines priced at current catalog prices, in cart order.
    ///
    /// Lines whose item is missing from the catalog are skipped.
    ///
    /// ## Errors
    /// `CoreError::AmountOverflow` if a line total does not fit.
    pub fn priced_lines<'a>(&self, catalog: &'a Catalog) -> CoreResult<Vec<PricedLine<'a>>> {
        self.lines
            .iter()
            .filter_map(|l| catalog.get(&l.item_id).map(|item| (item, l.quantity)))
            .map(|(item, quantity)| -> CoreResult<PricedLine<'a>> {
                let line_total = item
                    .price()
                    .checked_multiply_quantity(quantity)
                    .ok_or(CoreError::AmountOverflow)?;
                Ok(PricedLine {
                    item,
                    quantity,
                    line_total,
                })
            })
            .collect()
    }

    /// Sum over lines of current catalog price × quantity.
    ///
    /// ## Errors
    /// `CoreError::AmountOverflow` if the sum does not fit.
    pub fn total(&self, catalog: &Catalog) -> CoreResult<Money> {
        let lines = self.priced_lines(catalog)?;
        Money::checked_sum(lines.iter().map(|l| l.line_total)).ok_or(CoreError::AmountOverflow)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
