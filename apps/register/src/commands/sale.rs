//! # Sale Commands
//!
//! Checkout turns the cart into a recorded transaction.
//!
//! ```text
//! Cart: Beer x2 ──► checkout() ──► Action::Checkout { new id, now }
//!                                        │
//!                      ┌─────────────────┼──────────────────┐
//!                      ▼                 ▼                  ▼
//!               Beer.stock -= 2   ledger.prepend(tx)   cart cleared
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use barpos_core::{Action, Transaction};

use crate::error::ApiError;
use crate::state::{ConfigState, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    pub transaction_id: String,
    pub store_name: String,
    pub timestamp: String,
    pub items: Vec<ReceiptItem>,
    pub total_cents: i64,
    /// Total formatted with the configured currency symbol
    pub total_display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl ReceiptResponse {
    fn new(tx: &Transaction, config: &ConfigState) -> Self {
        ReceiptResponse {
            transaction_id: tx.id.clone(),
            store_name: config.store_name.clone(),
            timestamp: tx.timestamp.to_rfc3339(),
            items: tx
                .lines
                .iter()
                .map(|l| ReceiptItem {
                    name: l.name.clone(),
                    quantity: l.quantity,
                    unit_price_cents: l.unit_price_cents,
                    line_total_cents: l.line_total().cents(),
                })
                .collect(),
            total_cents: tx.total_cents,
            total_display: config.format_currency(tx.total_cents),
        }
    }
}

/// Completes the sale in the cart.
///
/// ## Errors
/// - `CART_ERROR` when the cart is empty
/// - `INSUFFICIENT_STOCK` when any line exceeds the item's stock; nothing
///   is recorded and the cart is kept
pub fn checkout(session: &SessionState, config: &ConfigState) -> Result<ReceiptResponse, ApiError> {
    debug!("checkout command");

    let action = Action::Checkout {
        transaction_id: Uuid::new_v4(),
        at: Utc::now(),
    };
    let receipt = session
        .dispatch(action, |s| {
            s.ledger().latest().map(|tx| ReceiptResponse::new(tx, config))
        })?
        .ok_or_else(|| ApiError::internal("Recorded sale missing from ledger"))?;

    info!(
        transaction_id = %receipt.transaction_id,
        total = receipt.total_cents,
        lines = receipt.items.len(),
        "Sale recorded"
    );
    Ok(receipt)
}
