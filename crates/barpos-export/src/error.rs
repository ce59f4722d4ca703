//! # Export Error Types
//!
//! ## Error Flow
//! ```text
//! std::io::Error / rust_xlsxwriter::XlsxError
//!       │
//!       ▼
//! ExportError (this module) ← Adds context and categorization
//!       │
//!       ▼
//! ApiError (in register) ← Serialized for the front end
//! ```

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// The export directory could not be created or the file opened.
    #[error("Cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workbook could not be built or encoded.
    #[error("Spreadsheet encoding failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl ExportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
