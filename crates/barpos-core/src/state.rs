//! # Register State
//!
//! `PosState` holds everything a session knows; [`apply`] is the only way it
//! changes.
//!
//! ## Reducer Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   PosState ──┐                                                          │
//! │              ├──► apply() ──► Ok(next PosState)                         │
//! │   Action  ───┘        │                                                 │
//! │                       └────► Err(CoreError)   (input state untouched)   │
//! │                                                                         │
//! │   Ids and timestamps travel inside the Action, so apply() is pure:      │
//! │   the same state and action always give the same result.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Checkout
//! The one transition that touches several components at once:
//! ```text
//! Cart [Beer x2]            Catalog Beer.stock 100 ──► 98
//!      │                    Ledger  [] ──────────────► [T1 {Beer x2 @ $5.00, total $10.00}]
//!      └──► Checkout ─────► Cart    [Beer x2] ───────► []
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::ledger::{Ledger, Selection};
use crate::types::{Item, NewItem, Transaction, TransactionLine};

// =============================================================================
// Actions
// =============================================================================

/// Every state change a session can make.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Inventory form submitted.
    AddItem { id: Uuid, fields: NewItem },
    /// Stock field edited on an inventory card.
    SetStock { item_id: String, stock: i64 },
    /// Inventory card edit saved.
    UpdateItem { item: Item },
    /// Item tile tapped on the sell screen.
    AddToCart { item_id: String },
    RemoveFromCart { item_id: String },
    SetQuantity { item_id: String, quantity: i64 },
    ClearCart,
    /// Sale completed.
    Checkout {
        transaction_id: Uuid,
        at: DateTime<Utc>,
    },
    /// Transaction card clicked in the history view.
    ToggleSelection { transaction_id: String },
    ClearSelection,
}

impl Action {
    /// Short name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddItem { .. } => "add_item",
            Action::SetStock { .. } => "set_stock",
            Action::UpdateItem { .. } => "update_item",
            Action::AddToCart { .. } => "add_to_cart",
            Action::RemoveFromCart { .. } => "remove_from_cart",
            Action::SetQuantity { .. } => "set_quantity",
            Action::ClearCart => "clear_cart",
            Action::Checkout { .. } => "checkout",
            Action::ToggleSelection { .. } => "toggle_selection",
            Action::ClearSelection => "clear_selection",
        }
    }
}

// =============================================================================
// State
// =============================================================================

/// Catalog, cart, ledger and history selection of one register session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosState {
    catalog: Catalog,
    cart: Cart,
    ledger: Ledger,
    selection: Selection,
}

impl PosState {
    /// A session with an empty catalog.
    pub fn new() -> Self {
        PosState::default()
    }

    /// A session starting from the seeded drinks menu.
    pub fn seeded() -> Self {
        PosState::with_catalog(Catalog::seeded())
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        PosState {
            catalog,
            ..PosState::default()
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Transactions the next export would cover.
    pub fn export_candidates(&self) -> Vec<&Transaction> {
        self.selection.resolve(&self.ledger)
    }

    fn dispatch(&mut self, action: Action) -> CoreResult<()> {
        match action {
            Action::AddItem { id, fields } => {
                self.catalog.add_item(id.to_string(), &fields)?;
            }
            Action::SetStock { item_id, stock } => self.catalog.set_stock(&item_id, stock)?,
            Action::UpdateItem { item } => self.catalog.update_item(item)?,
            Action::AddToCart { item_id } => {
                if self.catalog.get(&item_id).is_none() {
                    return Err(CoreError::ItemNotFound(item_id));
                }
                self.cart.add(&item_id)?;
            }
            Action::RemoveFromCart { item_id } => self.cart.remove(&item_id),
            Action::SetQuantity { item_id, quantity } => {
                self.cart.set_quantity(&item_id, quantity)?
            }
            Action::ClearCart => self.cart.clear(),
            Action::Checkout { transaction_id, at } => self.checkout(transaction_id, at)?,
            Action::ToggleSelection { transaction_id } => {
                if !self.ledger.contains(&transaction_id) {
                    return Err(CoreError::TransactionNotFound(transaction_id));
                }
                self.selection.toggle(&transaction_id);
            }
            Action::ClearSelection => self.selection.clear(),
        }

        // Quantity or price changes must leave a cart total that fits.
        self.cart.total(&self.catalog)?;
        Ok(())
    }

    /// Snapshots the cart into a transaction, takes the sold units out of
    /// stock, records the sale and empties the cart.
    fn checkout(&mut self, transaction_id: Uuid, at: DateTime<Utc>) -> CoreResult<()> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let mut lines = Vec::with_capacity(self.cart.item_count());
        for cart_line in self.cart.lines() {
            let item = self
                .catalog
                .get(&cart_line.item_id)
                .ok_or_else(|| CoreError::ItemNotFound(cart_line.item_id.clone()))?;
            lines.push(TransactionLine::snapshot(item, cart_line.quantity));
        }

        let transaction = Transaction::new(transaction_id.to_string(), lines, at)?;
        for line in &transaction.lines {
            self.catalog.decrement_stock(&line.item_id, line.quantity)?;
        }

        self.ledger.record(transaction);
        self.cart.clear();
        Ok(())
    }
}

/// Computes the state that follows `action`.
///
/// The input state is never modified; on error the caller keeps it as is.
pub fn apply(state: &PosState, action: Action) -> CoreResult<PosState> {
    let mut next = state.clone();
    next.dispatch(action)?;
    Ok(next)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::money::Money;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 21, 30, 0).unwrap()
    }

    fn id_of(state: &PosState, name: &str) -> String {
        state.catalog().find_by_name(name).unwrap().id.clone()
    }

    fn add(state: &PosState, item_id: &str) -> PosState {
        apply(
            state,
            Action::AddToCart {
                item_id: item_id.to_string(),
            },
        )
        .unwrap()
    }

    fn checkout(state: &PosState) -> CoreResult<PosState> {
        apply(
            state,
            Action::Checkout {
                transaction_id: Uuid::new_v4(),
                at: at(),
            },
        )
    }

    #[test]
    fn test_beer_twice_then_checkout() {
        let state = PosState::seeded();
        let beer = id_of(&state, "Beer");

        let state = add(&add(&state, &beer), &beer);
        assert_eq!(state.cart().quantity_of(&beer), Some(2));

        let state = checkout(&state).unwrap();

        assert_eq!(state.catalog().get(&beer).unwrap().stock, 98);
        let tx = state.ledger().latest().unwrap();
        assert_eq!(tx.total().to_string(), "$10.00");
        assert_eq!(tx.timestamp, at());
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_checkout_leaves_other_stock_alone() {
        let state = PosState::seeded();
        let red = id_of(&state, "Red Wine");
        let premium = id_of(&state, "Premium Spirit");

        let mut state = add(&state, &red);
        state = apply(
            &state,
            Action::SetQuantity {
                item_id: red.clone(),
                quantity: 4,
            },
        )
        .unwrap();
        state = add(&state, &premium);
        let state = checkout(&state).unwrap();

        for item in state.catalog().items() {
            let expected = if item.id == red {
                96
            } else if item.id == premium {
                99
            } else {
                100
            };
            assert_eq!(item.stock, expected, "{}", item.name);
        }
        assert_eq!(state.ledger().latest().unwrap().total().cents(), 4 * 500 + 800);
    }

    #[test]
    fn test_total_is_frozen_against_later_price_edits() {
        let state = PosState::seeded();
        let beer = id_of(&state, "Beer");
        let state = checkout(&add(&state, &beer)).unwrap();

        let mut repriced = state.catalog().get(&beer).unwrap().clone();
        repriced.price_cents = 900;
        repriced.name = "Craft Beer".to_string();
        let state = apply(&state, Action::UpdateItem { item: repriced }).unwrap();

        let tx = state.ledger().latest().unwrap();
        assert_eq!(tx.total().cents(), 500);
        assert_eq!(tx.lines[0].name, "Beer");
    }

    #[test]
    fn test_ledger_newest_first() {
        let state = PosState::seeded();
        let beer = id_of(&state, "Beer");
        let wine = id_of(&state, "White Wine");

        let state = checkout(&add(&state, &beer)).unwrap();
        let first = state.ledger().latest().unwrap().id.clone();
        let state = checkout(&add(&state, &wine)).unwrap();

        assert_eq!(state.ledger().len(), 2);
        assert_eq!(state.ledger().transactions()[1].id, first);
        assert_eq!(state.ledger().latest().unwrap().lines[0].item_id, wine);
    }

    #[test]
    fn test_empty_checkout_is_rejected() {
        let state = PosState::seeded();
        assert_eq!(checkout(&state), Err(CoreError::EmptyCart));
    }

    #[test]
    fn test_checkout_beyond_stock_changes_nothing() {
        let state = PosState::seeded();
        let beer = id_of(&state, "Beer");
        let premium = id_of(&state, "Premium Spirit");

        let mut state = add(&add(&state, &beer), &premium);
        state = apply(
            &state,
            Action::SetQuantity {
                item_id: premium.clone(),
                quantity: 101,
            },
        )
        .unwrap();

        let err = checkout(&state).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                name: "Premium Spirit".to_string(),
                available: 100,
                requested: 101,
            }
        );
        assert_eq!(state.catalog().get(&beer).unwrap().stock, 100);
        assert_eq!(state.cart().item_count(), 2);
        assert!(state.ledger().is_empty());
    }

    #[test]
    fn test_huge_quantity_is_rejected_without_change() {
        let state = PosState::seeded();
        let beer = id_of(&state, "Beer");
        let state = add(&state, &beer);

        let result = apply(
            &state,
            Action::SetQuantity {
                item_id: beer.clone(),
                quantity: i64::MAX / 100,
            },
        );

        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert_eq!(state.cart().quantity_of(&beer), Some(1));
        assert_eq!(state.cart().total(state.catalog()), Ok(Money::from_cents(500)));
    }

    #[test]
    fn test_price_edit_that_overflows_cart_total_is_rejected() {
        let state = PosState::seeded();
        let beer = id_of(&state, "Beer");
        let mut state = add(&state, &beer);
        state = apply(
            &state,
            Action::SetQuantity {
                item_id: beer.clone(),
                quantity: 3,
            },
        )
        .unwrap();

        let mut repriced = state.catalog().get(&beer).unwrap().clone();
        repriced.price_cents = i64::MAX / 2;
        let result = apply(&state, Action::UpdateItem { item: repriced });

        assert_eq!(result, Err(CoreError::AmountOverflow));
        assert_eq!(state.catalog().get(&beer).unwrap().price_cents, 500);
        assert!(checkout(&state).is_ok());
    }

    #[test]
    fn test_add_unknown_item_is_rejected() {
        let state = PosState::seeded();
        let result = apply(
            &state,
            Action::AddToCart {
                item_id: "nope".to_string(),
            },
        );
        assert_eq!(result, Err(CoreError::ItemNotFound("nope".to_string())));
    }

    #[test]
    fn test_remove_and_clear_cart() {
        let state = PosState::seeded();
        let beer = id_of(&state, "Beer");
        let wine = id_of(&state, "Red Wine");

        let state = add(&add(&state, &beer), &wine);
        let state = apply(
            &state,
            Action::RemoveFromCart {
                item_id: beer.clone(),
            },
        )
        .unwrap();
        assert_eq!(state.cart().quantity_of(&beer), None);
        assert_eq!(state.cart().quantity_of(&wine), Some(1));

        let state = apply(&state, Action::ClearCart).unwrap();
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_inventory_actions() {
        let state = PosState::new();
        let id = Uuid::new_v4();
        let state = apply(
            &state,
            Action::AddItem {
                id,
                fields: NewItem {
                    name: "Lager".to_string(),
                    price: "4.50".to_string(),
                    image_url: String::new(),
                    category: "Beer".to_string(),
                    description: "Pale lager".to_string(),
                    stock: "30".to_string(),
                },
            },
        )
        .unwrap();

        let lager = state.catalog().get(&id.to_string()).unwrap();
        assert_eq!(lager.price_cents, 450);

        let state = apply(
            &state,
            Action::SetStock {
                item_id: id.to_string(),
                stock: 12,
            },
        )
        .unwrap();
        assert_eq!(state.catalog().get(&id.to_string()).unwrap().stock, 12);

        let rejected = apply(
            &state,
            Action::SetStock {
                item_id: id.to_string(),
                stock: -2,
            },
        );
        assert!(matches!(rejected, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_selection_actions() {
        let state = PosState::seeded();
        let beer = id_of(&state, "Beer");
        let state = checkout(&add(&state, &beer)).unwrap();
        let state = checkout(&add(&state, &beer)).unwrap();
        let older = state.ledger().transactions()[1].id.clone();

        assert_eq!(state.export_candidates().len(), 2);

        let state = apply(
            &state,
            Action::ToggleSelection {
                transaction_id: older.clone(),
            },
        )
        .unwrap();
        let candidates = state.export_candidates();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, older);

        let state = apply(&state, Action::ClearSelection).unwrap();
        assert!(state.selection().is_empty());

        let unknown = apply(
            &state,
            Action::ToggleSelection {
                transaction_id: "missing".to_string(),
            },
        );
        assert_eq!(
            unknown,
            Err(CoreError::TransactionNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_apply_is_deterministic() {
        let state = PosState::seeded();
        let beer = id_of(&state, "Beer");
        let state = add(&state, &beer);
        let action = Action::Checkout {
            transaction_id: Uuid::nil(),
            at: at(),
        };

        assert_eq!(apply(&state, action.clone()), apply(&state, action));
    }

    #[test]
    fn test_action_serializes_with_type_tag() {
        let json = serde_json::to_value(Action::ClearCart).unwrap();
        assert_eq!(json["type"], "clear_cart");
        assert_eq!(Action::ClearCart.name(), "clear_cart");
    }
}
