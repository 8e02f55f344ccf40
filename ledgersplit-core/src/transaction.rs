//! Transaction records before and after normalization.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One data row of the export, as text. Empty cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// 1-based line in the source file
    pub line: u64,
    pub date: Option<String>,
    pub original_description: Option<String>,
    pub amount: Option<String>,
    pub category_subcategory: Option<String>,
    pub account_name: Option<String>,
    pub status: Option<String>,
}

impl RawTransaction {
    pub fn new(line: u64) -> Self {
        Self {
            line,
            ..Self::default()
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.original_description = Some(description.into());
        self
    }

    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category_subcategory = Some(category.into());
        self
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account_name = Some(account.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// A typed, projected transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDateTime,
    pub description: String,
    /// Positive = income, negative = expense
    pub amount: f64,
    pub category: String,
    pub account_name: String,
    pub line: u64,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}
