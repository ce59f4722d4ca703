//! # Command Protocol
//!
//! Routes JSON requests to commands, one request per line.
//!
//! ## Wire Format
//! ```text
//! → {"command":"add_to_cart","args":{"itemId":"6f1c..."}}
//! ← {"ok":{"lines":[...],"totals":{...}}}
//!
//! → {"command":"checkout"}
//! ← {"error":{"code":"CART_ERROR","message":"Cart is empty"}}
//! ```

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use barpos_core::NewItem;

use crate::commands::catalog::ItemDto;
use crate::commands::{cart, catalog, history, sale};
use crate::error::ApiError;
use crate::Register;

/// A request from the front end.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(
    tag = "command",
    content = "args",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum Request {
    ListItems,
    SearchItems { query: String },
    GetItem { id: String },
    AddItem { item: NewItem },
    SetStock { item_id: String, stock: i64 },
    UpdateItem { item: ItemDto },
    GetCart,
    AddToCart { item_id: String },
    RemoveFromCart { item_id: String },
    SetQuantity { item_id: String, quantity: i64 },
    ClearCart,
    Checkout,
    GetHistory,
    ToggleSelection { transaction_id: String },
    ClearSelection,
    ExportTransactions,
    GetConfig,
}

/// Reply to one request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Response {
    Ok(Value),
    Error(ApiError),
}

fn to_value<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

/// Runs one request against the register.
pub fn handle(register: &Register, request: Request) -> Result<Value, ApiError> {
    let session = &register.session;
    let config = &register.config;

    match request {
        Request::ListItems => to_value(catalog::list_items(session)),
        Request::SearchItems { query } => to_value(catalog::search_items(session, query)?),
        Request::GetItem { id } => to_value(catalog::get_item(session, id)?),
        Request::AddItem { item } => to_value(catalog::add_item(session, item)?),
        Request::SetStock { item_id, stock } => {
            to_value(catalog::set_stock(session, item_id, stock)?)
        }
        Request::UpdateItem { item } => to_value(catalog::update_item(session, item)?),
        Request::GetCart => to_value(cart::get_cart(session)?),
        Request::AddToCart { item_id } => to_value(cart::add_to_cart(session, item_id)?),
        Request::RemoveFromCart { item_id } => {
            to_value(cart::remove_from_cart(session, item_id)?)
        }
        Request::SetQuantity { item_id, quantity } => {
            to_value(cart::set_quantity(session, item_id, quantity)?)
        }
        Request::ClearCart => to_value(cart::clear_cart(session)?),
        Request::Checkout => to_value(sale::checkout(session, config)?),
        Request::GetHistory => to_value(history::get_history(session, config)),
        Request::ToggleSelection { transaction_id } => {
            to_value(history::toggle_selection(session, config, transaction_id)?)
        }
        Request::ClearSelection => to_value(history::clear_selection(session, config)?),
        Request::ExportTransactions => to_value(history::export_transactions(session, config)?),
        Request::GetConfig => to_value(crate::commands::config::get_config(config)),
    }
}

/// Parses and runs one request line.
pub fn handle_line(register: &Register, line: &str) -> Response {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Malformed request");
            return Response::Error(ApiError::internal(format!("Malformed request: {}", e)));
        }
    };

    debug!(?request, "Request received");
    match handle(register, request) {
        Ok(value) => Response::Ok(value),
        Err(err) => Response::Error(err),
    }
}

/// Serves requests from `input` until end of input, one reply line each.
///
/// Blank lines are skipped.
pub fn serve<R, W>(register: &Register, input: R, mut output: W) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(register, &line);
        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }

    Ok(())
}
