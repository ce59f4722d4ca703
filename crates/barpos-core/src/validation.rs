//! # Validation Module
//!
//! Parsing and validation of inventory form input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end form widgets                                        │
//! │  ├── required / type="number" / type="url"                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Text → Money / stock count, never NaN                              │
//! │  └── Required fields, lengths, non-negative numbers                     │
//! │                                                                         │
//! │  The front end is not trusted: anything that reaches the catalog has    │
//! │  been through layer 2.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use barpos_core::validation::{parse_price, parse_stock};
//!
//! assert_eq!(parse_price("4.50").unwrap().cents(), 450);
//! assert_eq!(parse_stock("100").unwrap(), 100);
//! assert!(parse_price("abc").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Item, NewItem};
use crate::{MAX_ITEM_QUANTITY, MAX_NAME_LEN, MAX_SEARCH_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_CATEGORY_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 1000;
const MAX_IMAGE_URL_LEN: usize = 2048;

// =============================================================================
// Numeric Parsers
// =============================================================================

/// Parses a price typed as decimal text into Money.
///
/// ## Rules
/// - Must not be empty
/// - Digits with an optional `.` and at most two fractional digits
/// - Must not be negative
///
/// ## Example
/// ```rust
/// use barpos_core::validation::parse_price;
///
/// assert_eq!(parse_price("5").unwrap().cents(), 500);
/// assert_eq!(parse_price("4.5").unwrap().cents(), 450);
/// assert_eq!(parse_price(" 0.99 ").unwrap().cents(), 99);
/// assert!(parse_price("").is_err());
/// assert!(parse_price("-1").is_err());
/// assert!(parse_price("1.999").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    if text.starts_with('-') {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: reason.to_string(),
    };

    let (whole, frac) = text.split_once('.').unwrap_or((text, ""));

    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("must be a decimal amount like 5 or 4.50"));
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid("must be a decimal amount like 5 or 4.50"));
    }
    if frac.len() > 2 {
        return Err(invalid("must have at most two decimal places"));
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid("is too large"))?
    };
    let frac_cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid("is not a number"))? * 10,
        _ => frac.parse().map_err(|_| invalid("is not a number"))?,
    };

    whole
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(frac_cents))
        .map(Money::from_cents)
        .ok_or_else(|| invalid("is too large"))
}

/// Parses a stock count typed as whole-number text.
///
/// ## Example
/// ```rust
/// use barpos_core::validation::parse_stock;
///
/// assert_eq!(parse_stock("0").unwrap(), 0);
/// assert!(parse_stock("2.5").is_err());
/// assert!(parse_stock("-3").is_err());
/// ```
pub fn parse_stock(text: &str) -> ValidationResult<i64> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: "stock".to_string(),
        });
    }

    let stock: i64 = text.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "stock".to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    validate_stock(stock)?;
    Ok(stock)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock level. Stock may be zero but never negative.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a cart line quantity.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## Example
/// ```rust
/// use barpos_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(999).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(1000).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents. Zero is allowed (free items).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    validate_max_len(field, value, max)
}

fn validate_max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an item name: required, at most 200 characters.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    validate_required_text("name", name, MAX_NAME_LEN)
}

/// Validates an item category: required, at most 100 characters.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    validate_required_text("category", category, MAX_CATEGORY_LEN)
}

/// Validates an image URL.
///
/// ## Rules
/// - May be empty (tile shows no picture)
/// - Otherwise must be an http:// or https:// URL without spaces
pub fn validate_image_url(url: &str) -> ValidationResult<()> {
    let url = url.trim();

    if url.is_empty() {
        return Ok(());
    }

    validate_max_len("image_url", url, MAX_IMAGE_URL_LEN)?;

    let has_scheme = url.starts_with("http://") || url.starts_with("https://");
    if !has_scheme || url.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "image_url".to_string(),
            reason: "must be an http(s) URL".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Returns
/// The trimmed query string. Empty is allowed and matches everything.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();
    validate_max_len("query", query, MAX_SEARCH_QUERY_LEN)?;
    Ok(query.to_string())
}

// =============================================================================
// Whole-Record Validators
// =============================================================================

/// Validates the add-item form and converts it into an [`Item`].
///
/// Every field the form marks as required (all but the image URL) must be
/// present.
pub fn validate_new_item(id: String, fields: &NewItem) -> ValidationResult<Item> {
    validate_item_name(&fields.name)?;
    let price = parse_price(&fields.price)?;
    validate_image_url(&fields.image_url)?;
    validate_category(&fields.category)?;
    validate_required_text("description", &fields.description, MAX_DESCRIPTION_LEN)?;
    let stock = parse_stock(&fields.stock)?;

    Ok(Item {
        id,
        name: fields.name.trim().to_string(),
        price_cents: price.cents(),
        image_url: fields.image_url.trim().to_string(),
        category: fields.category.trim().to_string(),
        description: fields.description.trim().to_string(),
        stock,
    })
}

/// Validates an edited item before it replaces the catalog entry.
///
/// The edit form does not require a description, so only its length is
/// checked.
pub fn validate_item(item: &Item) -> ValidationResult<()> {
    validate_item_name(&item.name)?;
    validate_price_cents(item.price_cents)?;
    validate_image_url(&item.image_url)?;
    validate_category(&item.category)?;
    validate_max_len("description", &item.description, MAX_DESCRIPTION_LEN)?;
    validate_stock(item.stock)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NewItem {
        NewItem {
            name: "Cider".to_string(),
            price: "6.50".to_string(),
            image_url: "https://example.com/cider.jpg".to_string(),
            category: "Beer".to_string(),
            description: "Dry apple cider".to_string(),
            stock: "24".to_string(),
        }
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("5").unwrap().cents(), 500);
        assert_eq!(parse_price("5.").unwrap().cents(), 500);
        assert_eq!(parse_price(".5").unwrap().cents(), 50);
        assert_eq!(parse_price("4.05").unwrap().cents(), 405);
        assert_eq!(parse_price("0").unwrap().cents(), 0);

        assert!(matches!(parse_price("  "), Err(ValidationError::Required { .. })));
        assert!(matches!(parse_price("-5"), Err(ValidationError::OutOfRange { .. })));
        assert!(matches!(parse_price("."), Err(ValidationError::InvalidFormat { .. })));
        assert!(matches!(parse_price("five"), Err(ValidationError::InvalidFormat { .. })));
        assert!(matches!(parse_price("1e3"), Err(ValidationError::InvalidFormat { .. })));
        assert!(matches!(parse_price("+5"), Err(ValidationError::InvalidFormat { .. })));
        assert!(matches!(parse_price("1.2.3"), Err(ValidationError::InvalidFormat { .. })));
        assert!(parse_price("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_stock() {
        assert_eq!(parse_stock(" 100 ").unwrap(), 100);
        assert!(matches!(parse_stock(""), Err(ValidationError::Required { .. })));
        assert!(matches!(parse_stock("ten"), Err(ValidationError::InvalidFormat { .. })));
        assert!(matches!(parse_stock("-1"), Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn test_validate_quantity_bounds() {
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert_eq!(
            validate_quantity(MAX_ITEM_QUANTITY + 1),
            Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: MAX_ITEM_QUANTITY,
            })
        );
        assert!(validate_quantity(i64::MAX / 100).is_err());
    }

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("").is_ok());
        assert!(validate_image_url("https://images.example.com/a.jpg?w=500").is_ok());
        assert!(validate_image_url("ftp://example.com/a.jpg").is_err());
        assert!(validate_image_url("https://example.com/a b.jpg").is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  wine ").unwrap(), "wine");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"w".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_new_item() {
        let item = validate_new_item("id-1".to_string(), &form()).unwrap();
        assert_eq!(item.price_cents, 650);
        assert_eq!(item.stock, 24);
        assert_eq!(item.name, "Cider");

        let mut missing_description = form();
        missing_description.description = " ".to_string();
        assert_eq!(
            validate_new_item("id-2".to_string(), &missing_description),
            Err(ValidationError::Required {
                field: "description".to_string()
            })
        );

        let mut no_image = form();
        no_image.image_url.clear();
        assert!(validate_new_item("id-3".to_string(), &no_image).is_ok());
    }

    #[test]
    fn test_validate_item() {
        let mut item = validate_new_item("id-1".to_string(), &form()).unwrap();
        item.description.clear();
        assert!(validate_item(&item).is_ok());

        item.stock = -1;
        assert!(validate_item(&item).is_err());

        item.stock = 0;
        item.name = "x".repeat(201);
        assert!(validate_item(&item).is_err());
    }
}
