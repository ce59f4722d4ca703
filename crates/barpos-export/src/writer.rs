//! # Spreadsheet Writer
//!
//! Writes export rows as an Excel workbook with a single `Transactions`
//! sheet.
//!
//! ## Sheet Layout
//! ```text
//! Row 0  │ Transaction ID │ Date │ Item Name │ Category │ Quantity │ Unit Price │ Total │  (bold)
//! Row 1+ │ text           │ text │ text      │ text     │ number   │ 0.00       │ 0.00  │
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use barpos_core::Money;
use chrono::NaiveDate;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};
use tracing::{debug, info};

use crate::error::{ExportError, ExportResult};
use crate::rows::{ExportRow, COLUMNS};

/// Extension of the files this crate writes.
pub const FILE_EXTENSION: &str = "xlsx";

/// Name of the one worksheet in every export.
pub const SHEET_NAME: &str = "Transactions";

const AMOUNT_FORMAT: &str = "0.00";

/// File name for an export made on `date`, e.g. `transactions-2024-06-01.xlsx`.
pub fn file_name_for(date: NaiveDate) -> String {
    format!("transactions-{}.{}", date.format("%Y-%m-%d"), FILE_EXTENSION)
}

fn amount(money: Money) -> f64 {
    money.cents() as f64 / 100.0
}

/// Builds the workbook: header row, then one row per export row.
///
/// The header is written even when `rows` is empty.
pub fn build_workbook(rows: &[ExportRow]) -> ExportResult<Workbook> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let money = Format::new().set_num_format(AMOUNT_FORMAT);

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in (0..).zip(COLUMNS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }

    for (row_num, row) in (1..).zip(rows) {
        let row_num: RowNum = row_num;
        let cells: [(ColNum, &str); 4] = [
            (0, row.transaction_id.as_str()),
            (1, row.date.as_str()),
            (2, row.item_name.as_str()),
            (3, row.category.as_str()),
        ];
        for (col, text) in cells {
            sheet.write_string(row_num, col, text)?;
        }
        sheet.write_number(row_num, 4, row.quantity as f64)?;
        sheet.write_number_with_format(row_num, 5, amount(row.unit_price), &money)?;
        sheet.write_number_with_format(row_num, 6, amount(row.total), &money)?;
    }

    Ok(workbook)
}

/// Writes `rows` to `dir/transactions-<date>.xlsx`, creating `dir` if needed.
///
/// An existing export from the same day is overwritten.
///
/// ## Returns
/// The path of the written file.
pub fn write_to_dir(dir: &Path, rows: &[ExportRow], date: NaiveDate) -> ExportResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;

    let path = dir.join(file_name_for(date));
    debug!(path = %path.display(), rows = rows.len(), "Writing export");

    let bytes = build_workbook(rows)?.save_to_buffer()?;
    fs::write(&path, bytes).map_err(|e| ExportError::io(&path, e))?;

    info!(path = %path.display(), rows = rows.len(), "Export written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use std::io::Cursor;

    fn row(tx: &str, name: &str) -> ExportRow {
        ExportRow {
            transaction_id: tx.to_string(),
            date: "2024-06-01 21:30:00".to_string(),
            item_name: name.to_string(),
            category: "Wine".to_string(),
            quantity: 2,
            unit_price: Money::from_cents(500),
            total: Money::from_cents(1000),
        }
    }

    fn read_back(rows: &[ExportRow]) -> (Vec<String>, Vec<Vec<Data>>) {
        let bytes = build_workbook(rows).unwrap().save_to_buffer().unwrap();
        let mut workbook = Xlsx::new(Cursor::new(bytes)).unwrap();
        let names = workbook.sheet_names();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        (names, range.rows().map(<[Data]>::to_vec).collect())
    }

    fn text(value: &str) -> Data {
        Data::String(value.to_string())
    }

    #[test]
    fn test_file_name_for() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(file_name_for(date), "transactions-2024-06-01.xlsx");
    }

    #[test]
    fn test_workbook_layout() {
        let (names, rows) = read_back(&[row("t1", "Red Wine")]);
        assert_eq!(names, [SHEET_NAME]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], COLUMNS.map(text));
        assert_eq!(
            rows[1],
            [
                text("t1"),
                text("2024-06-01 21:30:00"),
                text("Red Wine"),
                text("Wine"),
                Data::Float(2.0),
                Data::Float(5.0),
                Data::Float(10.0),
            ]
        );
    }

    #[test]
    fn test_cell_text_is_kept_verbatim() {
        let (_, rows) = read_back(&[row("t1", "Gin, Tonic")]);
        assert_eq!(rows[1][2], text("Gin, Tonic"));
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let (names, rows) = read_back(&[]);
        assert_eq!(names, [SHEET_NAME]);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_write_to_dir_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("exports");
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let path = write_to_dir(&dir, &[row("t1", "Beer"), row("t1", "Red Wine")], date).unwrap();

        assert_eq!(path, dir.join("transactions-2024-06-01.xlsx"));
        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        assert_eq!(range.height(), 3);
    }
}
