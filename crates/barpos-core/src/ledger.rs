//! # Transaction Ledger
//!
//! Completed sales, newest first, and the history view's export selection.
//!
//! ```text
//! checkout ──► record(T3) ──► [T3, T2, T1]
//!                                 │
//!              Selection {T2} ────┤
//!                                 ▼
//!              resolve() ──► [T2]            (empty selection ► all)
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Transaction;

// =============================================================================
// Ledger
// =============================================================================

/// Append-only history of completed sales.
///
/// There is no cap and no eviction; entries are never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            transactions: Vec::new(),
        }
    }

    /// Records a transaction at the front of the history.
    pub fn record(&mut self, transaction: Transaction) {
        self.transactions.insert(0, transaction);
    }

    /// All transactions, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The most recent transaction.
    pub fn latest(&self) -> Option<&Transaction> {
        self.transactions.first()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Which part of the ledger an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExportScope {
    /// Nothing selected: the whole ledger.
    All,
    /// Only the selected transactions.
    Selected,
}

impl ExportScope {
    /// Label used on the export button ("Export All" / "Export Selected").
    pub fn label(&self) -> &'static str {
        match self {
            ExportScope::All => "All",
            ExportScope::Selected => "Selected",
        }
    }
}

/// Transaction ids picked in the history view.
///
/// An empty selection conventionally means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Selection {
            ids: BTreeSet::new(),
        }
    }

    /// Flips membership of `id`. Returns `true` if it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn scope(&self) -> ExportScope {
        if self.ids.is_empty() {
            ExportScope::All
        } else {
            ExportScope::Selected
        }
    }

    /// Transactions this selection covers, in ledger order.
    pub fn resolve<'a>(&self, ledger: &'a Ledger) -> Vec<&'a Transaction> {
        ledger
            .transactions()
            .iter()
            .filter(|t| self.ids.is_empty() || self.ids.contains(&t.id))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn tx(id: &str) -> Transaction {
        Transaction::new(id, Vec::new(), Utc::now()).unwrap()
    }

    fn ledger_of(ids: &[&str]) -> Ledger {
        let mut ledger = Ledger::new();
        for id in ids {
            ledger.record(tx(id));
        }
        ledger
    }

    #[test]
    fn test_record_is_newest_first() {
        let ledger = ledger_of(&["t1", "t2"]);

        assert_eq!(ledger.latest().unwrap().id, "t2");
        let ids: Vec<&str> = ledger.transactions().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["t2", "t1"]);
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        assert_eq!(selection.scope(), ExportScope::All);

        assert!(selection.toggle("t1"));
        assert!(selection.contains("t1"));
        assert_eq!(selection.scope(), ExportScope::Selected);

        assert!(!selection.toggle("t1"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_empty_selection_resolves_to_all() {
        let ledger = ledger_of(&["t1", "t2", "t3"]);
        let selection = Selection::new();

        assert_eq!(selection.resolve(&ledger).len(), 3);
    }

    #[test]
    fn test_selection_resolves_in_ledger_order() {
        let ledger = ledger_of(&["t1", "t2", "t3"]);
        let mut selection = Selection::new();
        selection.toggle("t1");
        selection.toggle("t3");

        let ids: Vec<&str> = selection
            .resolve(&ledger)
            .into_iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["t3", "t1"]);
    }

    #[test]
    fn test_scope_label() {
        assert_eq!(ExportScope::All.label(), "All");
        assert_eq!(ExportScope::Selected.label(), "Selected");
    }
}
