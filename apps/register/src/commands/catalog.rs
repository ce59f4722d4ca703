//! # Catalog Commands
//!
//! Item listing, search and the inventory editor.
//!
//! ## Inventory Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory Editor                                     │
//! │                                                                         │
//! │  Add form ─────────► add_item(NewItem) ────► Action::AddItem            │
//! │                        (fresh UUID)                                     │
//! │                                                                         │
//! │  Stock field ──────► set_stock(id, n) ─────► Action::SetStock           │
//! │                                                                         │
//! │  Edit card ────────► update_item(dto) ─────► Action::UpdateItem         │
//! │                                                                         │
//! │  Search box ───────► search_items(query) ──► (read only)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use barpos_core::validation::validate_search_query;
use barpos_core::{Action, Item, NewItem};

use crate::error::ApiError;
use crate::state::SessionState;

/// Item DTO for the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub image_url: String,
    pub category: String,
    pub description: String,
    pub stock: i64,
}

impl From<&Item> for ItemDto {
    fn from(item: &Item) -> Self {
        ItemDto {
            id: item.id.clone(),
            name: item.name.clone(),
            price_cents: item.price_cents,
            image_url: item.image_url.clone(),
            category: item.category.clone(),
            description: item.description.clone(),
            stock: item.stock,
        }
    }
}

impl From<ItemDto> for Item {
    fn from(dto: ItemDto) -> Self {
        Item {
            id: dto.id,
            name: dto.name,
            price_cents: dto.price_cents,
            image_url: dto.image_url,
            category: dto.category,
            description: dto.description,
            stock: dto.stock,
        }
    }
}

/// Every catalog item, in catalog order.
pub fn list_items(session: &SessionState) -> Vec<ItemDto> {
    debug!("list_items command");
    session.with_state(|s| s.catalog().items().iter().map(ItemDto::from).collect())
}

/// Items whose name contains `query`, ignoring case.
///
/// ## Arguments
/// * `query` - Search text; empty returns every item
pub fn search_items(session: &SessionState, query: String) -> Result<Vec<ItemDto>, ApiError> {
    let query = validate_search_query(&query)?;
    debug!(query = %query, "search_items command");

    let items: Vec<ItemDto> = session.with_state(|s| {
        s.catalog()
            .filter_by_name(&query)
            .into_iter()
            .map(ItemDto::from)
            .collect()
    });

    debug!(query = %query, count = items.len(), "search_items results");
    Ok(items)
}

pub fn get_item(session: &SessionState, id: String) -> Result<ItemDto, ApiError> {
    debug!(id = %id, "get_item command");
    session
        .with_state(|s| s.catalog().get(&id).map(ItemDto::from))
        .ok_or_else(|| ApiError::not_found("Item", &id))
}

/// Adds an item from the inventory form.
///
/// ## Returns
/// The new item, with its generated id
pub fn add_item(session: &SessionState, fields: NewItem) -> Result<ItemDto, ApiError> {
    debug!(name = %fields.name, "add_item command");

    let id = Uuid::new_v4();
    let key = id.to_string();
    let item = session
        .dispatch(Action::AddItem { id, fields }, |s| {
            s.catalog().get(&key).map(ItemDto::from)
        })?
        .ok_or_else(|| ApiError::internal("Added item missing from catalog"))?;

    info!(item_id = %item.id, name = %item.name, price = item.price_cents, stock = item.stock, "Item added");
    Ok(item)
}

/// Replaces an item's stock count.
pub fn set_stock(session: &SessionState, item_id: String, stock: i64) -> Result<ItemDto, ApiError> {
    debug!(item_id = %item_id, stock = stock, "set_stock command");

    let action = Action::SetStock {
        item_id: item_id.clone(),
        stock,
    };
    session
        .dispatch(action, |s| s.catalog().get(&item_id).map(ItemDto::from))?
        .ok_or_else(|| ApiError::not_found("Item", &item_id))
}

/// Saves an edited item over the one with the same id.
pub fn update_item(session: &SessionState, item: ItemDto) -> Result<ItemDto, ApiError> {
    debug!(item_id = %item.id, "update_item command");

    let id = item.id.clone();
    session
        .dispatch(Action::UpdateItem { item: item.into() }, |s| {
            s.catalog().get(&id).map(ItemDto::from)
        })?
        .ok_or_else(|| ApiError::not_found("Item", &id))
}
