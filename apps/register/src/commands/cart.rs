//! # Cart Commands
//!
//! Commands for the sale in progress.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────┐                    │
//! │  │  Empty   │────►│ In Cart  │────►│ Transaction  │                    │
//! │  │  Cart    │     │          │     │  recorded    │                    │
//! │  └──────────┘     └──────────┘     └──────────────┘                    │
//! │       ▲                │                  │                             │
//! │       │           add_to_cart         checkout                          │
//! │       │           set_quantity        (sale.rs)                         │
//! │       │           remove_from_cart        │                             │
//! │       │                │                  │                             │
//! │       └── clear_cart ──┘◄─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use barpos_core::{Action, CoreError, CoreResult, PosState};

use crate::error::ApiError;
use crate::state::SessionState;

/// One cart line with its current catalog name and price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    pub item_id: String,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub line_total_cents: i64,
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub total_cents: i64,
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineDto>,
    pub totals: CartTotals,
}

impl TryFrom<&PosState> for CartResponse {
    type Error = CoreError;

    fn try_from(state: &PosState) -> CoreResult<Self> {
        let cart = state.cart();
        let catalog = state.catalog();

        let lines = cart
            .priced_lines(catalog)?
            .into_iter()
            .map(|line| CartLineDto {
                item_id: line.item.id.clone(),
                name: line.item.name.clone(),
                unit_price_cents: line.item.price_cents,
                quantity: line.quantity,
                line_total_cents: line.line_total.cents(),
            })
            .collect();

        Ok(CartResponse {
            lines,
            totals: CartTotals {
                item_count: cart.item_count(),
                total_quantity: cart.total_quantity(),
                total_cents: cart.total(catalog)?.cents(),
            },
        })
    }
}

fn cart_of(state: &PosState) -> Result<CartResponse, ApiError> {
    Ok(CartResponse::try_from(state)?)
}

/// Gets the current cart contents.
pub fn get_cart(session: &SessionState) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    session.with_state(cart_of)
}

/// Adds one unit of an item to the cart.
///
/// ## Behavior
/// - If item already in cart: quantity increases by one
/// - If item not in cart: added with quantity 1
/// - Unknown item: `NOT_FOUND`
/// - Line already at the quantity limit: `VALIDATION_ERROR`
pub fn add_to_cart(session: &SessionState, item_id: String) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, "add_to_cart command");
    session.dispatch(Action::AddToCart { item_id }, cart_of)?
}

/// Removes an item's line from the cart. Absent items are ignored.
pub fn remove_from_cart(session: &SessionState, item_id: String) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, "remove_from_cart command");
    session.dispatch(Action::RemoveFromCart { item_id }, cart_of)?
}

/// Sets the quantity of a cart line.
///
/// ## Behavior
/// - Quantity 0 or below: removes the line
/// - Quantity above the limit: `VALIDATION_ERROR`, cart unchanged
/// - Item not in cart: no change
pub fn set_quantity(
    session: &SessionState,
    item_id: String,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, quantity = quantity, "set_quantity command");
    session.dispatch(Action::SetQuantity { item_id, quantity }, cart_of)?
}

/// Clears all lines from the cart.
pub fn clear_cart(session: &SessionState) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");
    session.dispatch(Action::ClearCart, cart_of)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn session_with_ids() -> (SessionState, String, String) {
        let session = SessionState::new(PosState::seeded());
        let (beer, spirit) = session.with_state(|s| {
            (
                s.catalog().find_by_name("Beer").unwrap().id.clone(),
                s.catalog().find_by_name("Premium Spirit").unwrap().id.clone(),
            )
        });
        (session, beer, spirit)
    }

    #[test]
    fn test_add_to_cart_totals() {
        let (session, beer, spirit) = session_with_ids();

        add_to_cart(&session, beer.clone()).unwrap();
        add_to_cart(&session, beer).unwrap();
        let cart = add_to_cart(&session, spirit).unwrap();

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.lines[0].name, "Beer");
        assert_eq!(cart.lines[0].line_total_cents, 1000);
        assert_eq!(
            cart.totals,
            CartTotals {
                item_count: 2,
                total_quantity: 3,
                total_cents: 1800,
            }
        );
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let (session, beer, _) = session_with_ids();
        add_to_cart(&session, beer.clone()).unwrap();

        let cart = set_quantity(&session, beer, 0).unwrap();

        assert!(cart.lines.is_empty());
        assert_eq!(cart.totals.total_cents, 0);
    }

    #[test]
    fn test_add_unknown_item() {
        let (session, _, _) = session_with_ids();
        let err = add_to_cart(&session, "ghost".to_string()).unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_cart(&session).unwrap().lines.is_empty());
    }

    #[test]
    fn test_set_quantity_above_limit_keeps_cart() {
        let (session, beer, _) = session_with_ids();
        add_to_cart(&session, beer.clone()).unwrap();

        let err = set_quantity(&session, beer, i64::MAX / 100).unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        let cart = get_cart(&session).unwrap();
        assert_eq!(cart.totals.total_quantity, 1);
        assert_eq!(cart.totals.total_cents, 500);
    }

    #[test]
    fn test_cart_response_camel_case() {
        let (session, beer, _) = session_with_ids();
        let cart = add_to_cart(&session, beer).unwrap();

        let json = serde_json::to_value(cart).unwrap();
        assert_eq!(json["totals"]["totalCents"], 500);
        assert_eq!(json["lines"][0]["unitPriceCents"], 500);
    }
}
