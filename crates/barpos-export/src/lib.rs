//! # barpos-export: Transaction History Export
//!
//! Projects completed transactions into spreadsheet rows and writes them as
//! a dated Excel workbook with one `Transactions` sheet.
//!
//! ## Flow
//! ```text
//! ┌───────────────┐    ┌──────────────┐    ┌──────────────────────────────┐
//! │ &[Transaction]│───►│  build_rows  │───►│ write_to_dir                 │
//! │ (already      │    │  (rows.rs)   │    │ transactions-YYYY-MM-DD.xlsx │
//! │  filtered)    │    └──────────────┘    └──────────────────────────────┘
//! └───────────────┘
//! ```
//!
//! Choosing *which* transactions to export is the caller's job
//! (`barpos_core::Selection::resolve`); this crate only formats and writes.

pub mod error;
pub mod rows;
pub mod writer;

use std::path::{Path, PathBuf};

use barpos_core::Transaction;
use chrono::NaiveDate;

pub use error::{ExportError, ExportResult};
pub use rows::{build_rows, ExportRow, COLUMNS, DATE_FORMAT};
pub use writer::{build_workbook, file_name_for, write_to_dir, SHEET_NAME};

/// Exports `transactions` into `dir`, naming the file after `date`.
///
/// ## Example
/// ```rust,no_run
/// use barpos_core::PosState;
/// use chrono::Utc;
///
/// let state = PosState::seeded();
/// let path = barpos_export::export_transactions(
///     std::path::Path::new("/tmp"),
///     &state.export_candidates(),
///     Utc::now().date_naive(),
/// )?;
/// println!("wrote {}", path.display());
/// # Ok::<(), barpos_export::ExportError>(())
/// ```
pub fn export_transactions(
    dir: &Path,
    transactions: &[&Transaction],
    date: NaiveDate,
) -> ExportResult<PathBuf> {
    let rows = build_rows(transactions.iter().copied());
    write_to_dir(dir, &rows, date)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use barpos_core::{apply, Action, PosState};
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn sell(state: PosState, name: &str, times: usize, minute: u32) -> PosState {
        let id = state.catalog().find_by_name(name).unwrap().id.clone();
        let mut state = state;
        for _ in 0..times {
            state = apply(&state, Action::AddToCart { item_id: id.clone() }).unwrap();
        }
        apply(
            &state,
            Action::Checkout {
                transaction_id: Uuid::new_v4(),
                at: Utc.with_ymd_and_hms(2024, 6, 1, 20, minute, 0).unwrap(),
            },
        )
        .unwrap()
    }

    fn two_sales() -> PosState {
        let state = sell(PosState::seeded(), "Beer", 2, 0);
        let state = apply(
            &state,
            Action::AddToCart {
                item_id: state.catalog().find_by_name("Red Wine").unwrap().id.clone(),
            },
        )
        .unwrap();
        sell(state, "Premium Spirit", 1, 5)
    }

    fn read_rows(path: &Path) -> Vec<Vec<Data>> {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        range.rows().map(<[Data]>::to_vec).collect()
    }

    fn text(value: &str) -> Data {
        Data::String(value.to_string())
    }

    #[test]
    fn test_empty_selection_exports_every_line() {
        let state = two_sales();
        let tmp = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let path = export_transactions(tmp.path(), &state.export_candidates(), date).unwrap();

        let rows = read_rows(&path);
        // header + Red Wine + Premium Spirit (newest sale) + Beer
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], COLUMNS.map(text));
        assert_eq!(rows[1][2], text("Red Wine"));
        assert_eq!(rows[2][2], text("Premium Spirit"));
        assert_eq!(
            rows[3][2..],
            [
                text("Beer"),
                text("Beer"),
                Data::Float(2.0),
                Data::Float(5.0),
                Data::Float(10.0),
            ]
        );
    }

    #[test]
    fn test_single_selection_exports_only_that_transaction() {
        let state = two_sales();
        let first_sale = state.ledger().transactions()[1].id.clone();
        let state = apply(
            &state,
            Action::ToggleSelection {
                transaction_id: first_sale.clone(),
            },
        )
        .unwrap();
        let tmp = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let path = export_transactions(tmp.path(), &state.export_candidates(), date).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], text(&first_sale));
        assert_eq!(rows[1][1], text("2024-06-01 20:00:00"));
    }

    #[test]
    fn test_export_with_no_transactions_writes_header() {
        let tmp = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let path = export_transactions(tmp.path(), &[], date).unwrap();

        assert!(path.ends_with("transactions-2024-06-01.xlsx"));
        assert_eq!(read_rows(&path), vec![COLUMNS.map(text).to_vec()]);
    }
}
