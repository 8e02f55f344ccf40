//! Partition normalized transactions into income and expense ledgers.

use ledgersplit_core::{Ledger, LedgerEntry, LedgerKind, Transaction};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub income: Ledger,
    pub expenses: Ledger,
}

fn entry(txn: &Transaction, amount: f64) -> LedgerEntry {
    LedgerEntry {
        date: txn.date.date(),
        description: txn.description.clone(),
        amount,
        category: txn.category.clone(),
        account_name: txn.account_name.clone(),
    }
}

/// Income keeps positive amounts as-is, expenses store the magnitude of
/// negative amounts. Zero-amount rows land in neither ledger.
pub fn split_ledgers(txns: &[Transaction]) -> Split {
    let mut income = Ledger::new(LedgerKind::Income);
    let mut expenses = Ledger::new(LedgerKind::Expenses);

    for txn in txns {
        if txn.is_income() {
            income.entries.push(entry(txn, txn.amount));
        } else if txn.is_expense() {
            expenses.entries.push(entry(txn, -txn.amount));
        } else {
            debug!(line = txn.line, "zero amount, skipped");
        }
    }

    info!(income = income.len(), expenses = expenses.len(), "split ledgers");
    Split { income, expenses }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(line: u64, day: u32, amount: f64) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            description: format!("txn {line}"),
            amount,
            category: "Misc".to_string(),
            account_name: "Checking".to_string(),
            line,
        }
    }

    #[test]
    fn test_partition_by_sign() {
        let txns = vec![
            txn(2, 1, 100.0),
            txn(3, 2, -1234.56),
            txn(4, 3, 0.0),
            txn(5, 4, 0.01),
            txn(6, 5, -7.0),
        ];

        let split = split_ledgers(&txns);
        let income: Vec<_> = split.income.entries.iter().map(|e| e.amount).collect();
        let expenses: Vec<_> = split.expenses.entries.iter().map(|e| e.amount).collect();
        assert_eq!(income, vec![100.0, 0.01]);
        assert_eq!(expenses, vec![1234.56, 7.0]);
        assert_eq!(split.income.len() + split.expenses.len(), 4);
    }

    #[test]
    fn test_dates_lose_time_of_day() {
        let split = split_ledgers(&[txn(2, 9, -3.0)]);
        assert_eq!(
            split.expenses.entries[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()
        );
        assert_eq!(split.expenses.entries[0].description, "txn 2");
    }

    #[test]
    fn test_expense_amounts_are_magnitudes() {
        let txns: Vec<_> = (1..=5).map(|d| txn(d as u64, d, -(d as f64) * 1.25)).collect();
        let split = split_ledgers(&txns);
        for (entry, source) in split.expenses.entries.iter().zip(&txns) {
            assert!(entry.amount > 0.0);
            assert_eq!(entry.amount, source.amount.abs());
        }
        assert!(split.income.is_empty());
    }
}
