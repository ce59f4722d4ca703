//! # Item Catalog
//!
//! The ordered list of sellable items, plus the inventory editor operations
//! that mutate it.
//!
//! ## Catalog Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  View              Operation              Catalog change                │
//! │  ────              ─────────              ──────────────                │
//! │  Inventory form ─► add_item() ──────────► items.push(new item)          │
//! │  Stock field ────► set_stock() ─────────► items[i].stock = n            │
//! │  Edit card ──────► update_item() ───────► items[i] = edited             │
//! │  Search box ─────► filter_by_name() ────► (read only)                   │
//! │  Checkout ───────► decrement_stock() ───► items[i].stock -= qty         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Items are never removed, so an id that was once valid stays valid.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Item, NewItem};
use crate::validation::{validate_item, validate_new_item, validate_stock};
use crate::SEED_STOCK;

/// Starter menu: (name, price in cents, category, description, image URL).
const SEED_ITEMS: &[(&str, i64, &str, &str, &str)] = &[
    (
        "Beer",
        500,
        "Beer",
        "Refreshing draft beer",
        "https://images.unsplash.com/photo-1608270586620-248524c67de9?w=500",
    ),
    (
        "White Wine",
        500,
        "Wine",
        "Crisp white wine",
        "https://images.unsplash.com/photo-1566275529824-cca6d008f3da?w=500",
    ),
    (
        "Red Wine",
        500,
        "Wine",
        "Full-bodied red wine",
        "https://images.unsplash.com/photo-1510812431401-41d2bd2722f3?w=500",
    ),
    (
        "Spirits",
        500,
        "Spirits",
        "Standard spirits",
        "https://images.unsplash.com/photo-1514362545857-3bc16c4c7d1b?w=500",
    ),
    (
        "Premium Spirit",
        800,
        "Spirits",
        "Top-shelf premium spirits",
        "https://images.unsplash.com/photo-1569529465841-dfecdab7503b?w=500",
    ),
];

/// The item catalog, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog { items: Vec::new() }
    }

    /// Creates the starter catalog: five drinks with 100 units each.
    pub fn seeded() -> Self {
        let items = SEED_ITEMS
            .iter()
            .map(|&(name, price_cents, category, description, image_url)| Item {
                id: uuid::Uuid::new_v4().to_string(),
                name: name.to_string(),
                price_cents,
                image_url: image_url.to_string(),
                category: category.to_string(),
                description: description.to_string(),
                stock: SEED_STOCK,
            })
            .collect();

        Catalog { items }
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by id.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Looks up the first item with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    fn get_mut(&mut self, id: &str) -> CoreResult<&mut Item> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))
    }

    /// Parses the add-item form and appends the new item.
    ///
    /// ## Errors
    /// `CoreError::Validation` if any field fails to parse or validate; the
    /// catalog is left unchanged.
    pub fn add_item(&mut self, id: String, fields: &NewItem) -> CoreResult<&Item> {
        let item = validate_new_item(id, fields)?;
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Replaces an item's stock count.
    ///
    /// Negative counts are rejected rather than stored.
    pub fn set_stock(&mut self, id: &str, stock: i64) -> CoreResult<()> {
        validate_stock(stock)?;
        self.get_mut(id)?.stock = stock;
        Ok(())
    }

    /// Replaces every field of the item with the same id.
    pub fn update_item(&mut self, updated: Item) -> CoreResult<()> {
        validate_item(&updated)?;
        let slot = self.get_mut(&updated.id)?;
        *slot = updated;
        Ok(())
    }

    /// Takes `quantity` units out of stock for a sale.
    ///
    /// ## Errors
    /// `CoreError::InsufficientStock` if fewer than `quantity` units remain.
    pub fn decrement_stock(&mut self, id: &str, quantity: i64) -> CoreResult<()> {
        let item = self.get_mut(id)?;
        if !item.can_sell(quantity) {
            return Err(CoreError::InsufficientStock {
                name: item.name.clone(),
                available: item.stock,
                requested: quantity,
            });
        }
        item.stock -= quantity;
        Ok(())
    }

    /// Case-insensitive substring match on item name, in catalog order.
    ///
    /// An empty query matches every item.
    pub fn filter_by_name(&self, query: &str) -> Vec<&Item> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|i| i.name.to_lowercase().contains(&needle))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
