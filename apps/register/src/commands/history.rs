//! # History Commands
//!
//! Transaction history, selection and export.
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  History view                                                           │
//! │                                                                         │
//! │  click card ──► toggle_selection(id) ──► selection {t2}                 │
//! │                                                                         │
//! │  "Export Selected" ──► export_transactions()                            │
//! │        │                                                                │
//! │        │  lock: resolve selection, build rows, unlock                   │
//! │        ▼                                                                │
//! │  barpos_export::write_to_dir(export_dir, rows, today)                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  transactions-YYYY-MM-DD.xlsx (sheet "Transactions")                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use barpos_core::{Action, ExportScope, PosState, Transaction};
use barpos_export::{build_rows, write_to_dir};

use crate::error::ApiError;
use crate::state::{ConfigState, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryLine {
    pub name: String,
    pub quantity: i64,
}

/// One card in the history view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub id: String,
    pub timestamp: String,
    pub total_cents: i64,
    pub total_display: String,
    pub lines: Vec<HistoryLine>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    /// Newest first
    pub transactions: Vec<TransactionSummary>,
    pub scope: ExportScope,
    /// "All" or "Selected", for the export button
    pub scope_label: String,
    pub selected_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub path: String,
    pub scope: ExportScope,
    pub transaction_count: usize,
    pub row_count: usize,
}

fn summarize(tx: &Transaction, selected: bool, config: &ConfigState) -> TransactionSummary {
    TransactionSummary {
        id: tx.id.clone(),
        timestamp: tx.timestamp.to_rfc3339(),
        total_cents: tx.total_cents,
        total_display: config.format_currency(tx.total_cents),
        lines: tx
            .lines
            .iter()
            .map(|l| HistoryLine {
                name: l.name.clone(),
                quantity: l.quantity,
            })
            .collect(),
        selected,
    }
}

fn history_of(state: &PosState, config: &ConfigState) -> HistoryResponse {
    let selection = state.selection();
    let scope = selection.scope();

    HistoryResponse {
        transactions: state
            .ledger()
            .transactions()
            .iter()
            .map(|tx| summarize(tx, selection.contains(&tx.id), config))
            .collect(),
        scope,
        scope_label: scope.label().to_string(),
        selected_count: selection.len(),
    }
}

/// Gets the transaction history, newest first.
pub fn get_history(session: &SessionState, config: &ConfigState) -> HistoryResponse {
    debug!("get_history command");
    session.with_state(|s| history_of(s, config))
}

/// Selects or deselects one transaction for export.
pub fn toggle_selection(
    session: &SessionState,
    config: &ConfigState,
    transaction_id: String,
) -> Result<HistoryResponse, ApiError> {
    debug!(transaction_id = %transaction_id, "toggle_selection command");
    Ok(session.dispatch(Action::ToggleSelection { transaction_id }, |s| {
        history_of(s, config)
    })?)
}

/// Deselects everything, so the next export covers the whole ledger.
pub fn clear_selection(
    session: &SessionState,
    config: &ConfigState,
) -> Result<HistoryResponse, ApiError> {
    debug!("clear_selection command");
    Ok(session.dispatch(Action::ClearSelection, |s| history_of(s, config))?)
}

/// Writes the selected transactions (or all, when none are selected) to
/// `transactions-<today>.xlsx` in the configured export folder.
///
/// The file is written after the session lock is released.
pub fn export_transactions(
    session: &SessionState,
    config: &ConfigState,
) -> Result<ExportResponse, ApiError> {
    debug!(dir = %config.export_dir.display(), "export_transactions command");

    let (scope, transaction_count, rows) = session.with_state(|s| {
        let candidates = s.export_candidates();
        (
            s.selection().scope(),
            candidates.len(),
            build_rows(candidates),
        )
    });

    let path = write_to_dir(&config.export_dir, &rows, Utc::now().date_naive())?;

    info!(
        path = %path.display(),
        scope = scope.label(),
        transactions = transaction_count,
        rows = rows.len(),
        "Transactions exported"
    );
    Ok(ExportResponse {
        path: path.display().to_string(),
        scope,
        transaction_count,
        row_count: rows.len(),
    })
}
