//! Fixed exclusion rules for transfers, card payments and scheduled rows.
//!
//! Each rule is an independent predicate; a row is dropped when any rule
//! matches. Empty fields never match, so the row is kept on that rule.

use std::sync::LazyLock;

use ledgersplit_core::RawTransaction;
use regex::Regex;
use tracing::{debug, info};

static EXTERNAL_WITHDRAWAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"External Withdrawal.*(?:ALLY|GRDOBK|CAPITAL ONE)").expect("static pattern")
});

static DIVIDEND_INTEREST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Dividend.*Interest").expect("static pattern"));

/// A named exclusion predicate
#[derive(Debug, Clone, Copy)]
pub struct ExclusionRule {
    pub name: &'static str,
    pub matches: fn(&RawTransaction) -> bool,
}

pub fn is_scheduled(txn: &RawTransaction) -> bool {
    txn.status.as_deref().is_some_and(|s| s.contains("scheduled"))
}

pub fn is_credit_card_payment(txn: &RawTransaction) -> bool {
    txn.original_description
        .as_deref()
        .is_some_and(|d| d.contains("Credit Card Payment"))
}

/// Transfers out to linked external banks
pub fn is_external_withdrawal(txn: &RawTransaction) -> bool {
    txn.original_description
        .as_deref()
        .is_some_and(|d| EXTERNAL_WITHDRAWAL.is_match(d))
}

pub fn is_dividend_interest(txn: &RawTransaction) -> bool {
    txn.original_description
        .as_deref()
        .is_some_and(|d| DIVIDEND_INTEREST.is_match(d))
}

pub fn is_credit_card_category(txn: &RawTransaction) -> bool {
    txn.category_subcategory.as_deref() == Some("Credit Card Payments")
}

pub fn is_auto_loan_account(txn: &RawTransaction) -> bool {
    txn.account_name.as_deref() == Some("BECU - Loan - Auto Loan")
}

/// All rules. Order only affects which rule a drop is attributed to.
pub fn exclusion_rules() -> [ExclusionRule; 6] {
    [
        ExclusionRule {
            name: "scheduled",
            matches: is_scheduled,
        },
        ExclusionRule {
            name: "credit-card-payment",
            matches: is_credit_card_payment,
        },
        ExclusionRule {
            name: "external-withdrawal",
            matches: is_external_withdrawal,
        },
        ExclusionRule {
            name: "dividend-interest",
            matches: is_dividend_interest,
        },
        ExclusionRule {
            name: "credit-card-category",
            matches: is_credit_card_category,
        },
        ExclusionRule {
            name: "auto-loan-account",
            matches: is_auto_loan_account,
        },
    ]
}

/// How many rows each rule removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub kept: usize,
    pub dropped: Vec<(&'static str, usize)>,
}

impl FilterReport {
    pub fn total_dropped(&self) -> usize {
        self.dropped.iter().map(|(_, n)| n).sum()
    }
}

/// Drop every row matched by any rule, keeping survivors in input order.
pub fn apply_exclusions(rows: Vec<RawTransaction>) -> (Vec<RawTransaction>, FilterReport) {
    let rules = exclusion_rules();
    let mut counts = [0usize; 6];
    let mut kept = Vec::with_capacity(rows.len());

    for row in rows {
        match rules.iter().position(|r| (r.matches)(&row)) {
            Some(i) => {
                debug!(line = row.line, rule = rules[i].name, "excluded row");
                counts[i] += 1;
            }
            None => kept.push(row),
        }
    }

    let report = FilterReport {
        kept: kept.len(),
        dropped: rules.iter().map(|r| r.name).zip(counts).collect(),
    };
    info!(
        kept = report.kept,
        dropped = report.total_dropped(),
        "applied exclusion rules"
    );
    (kept, report)
}
