//! # Export Rows
//!
//! Flattens transactions into one spreadsheet row per transaction line.
//!
//! ```text
//! Transaction T1 { Beer x2, Red Wine x1 }        Rows
//!                    │                             ─────────────────────────────
//!                    └──────────────────────────►  T1 | ... | Beer     | 2 | ...
//!                                                  T1 | ... | Red Wine | 1 | ...
//! ```

use barpos_core::{Money, Transaction};

/// Column headers, in sheet order.
pub const COLUMNS: [&str; 7] = [
    "Transaction ID",
    "Date",
    "Item Name",
    "Category",
    "Quantity",
    "Unit Price",
    "Total",
];

/// How the `Date` column renders a transaction timestamp (UTC).
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One spreadsheet row: a single line of a single transaction.
///
/// Fields follow [`COLUMNS`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub transaction_id: String,
    pub date: String,
    pub item_name: String,
    pub category: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub total: Money,
}

/// Projects transactions into rows, keeping transaction and line order.
pub fn build_rows<'a, I>(transactions: I) -> Vec<ExportRow>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .flat_map(|tx| {
            let date = tx.timestamp.format(DATE_FORMAT).to_string();
            tx.lines.iter().map(move |line| ExportRow {
                transaction_id: tx.id.clone(),
                date: date.clone(),
                item_name: line.name.clone(),
                category: line.category.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price(),
                total: line.line_total(),
            })
        })
        .collect()
}
