//! Income / expense ledgers produced by splitting a normalized set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LedgerKind {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expenses")]
    Expenses,
}

impl LedgerKind {
    /// Worksheet name in the exported workbook
    pub fn sheet_name(&self) -> &'static str {
        match self {
            LedgerKind::Income => "Income",
            LedgerKind::Expenses => "Expenses",
        }
    }
}

/// A ledger row: amount is a non-negative magnitude, date has no time part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub account_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub kind: LedgerKind,
    pub entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new(kind: LedgerKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }
}
