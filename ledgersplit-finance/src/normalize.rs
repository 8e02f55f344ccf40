//! Project raw rows onto typed transactions and sort them by date.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use ledgersplit_core::{PipelineError, PipelineResult, RawTransaction, Transaction};
use tracing::info;

const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%m/%d/%y", "%Y-%m-%d", "%Y/%m/%d"];

/// Years a spreadsheet date cell can hold
const WORKBOOK_YEARS: RangeInclusive<i32> = 1900..=9999;

/// Strip `$` and `,` and parse the rest, e.g. `"-$1,234.56"` -> `-1234.56`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn format_allowed(fmt: &str, two_digit_year: bool) -> bool {
    !fmt.starts_with("%m") || fmt.contains("%y") == two_digit_year
}

/// Parse a date with an optional time of day. Date-only input is midnight.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();

    // %y would also accept the first two digits of a four digit year
    let two_digit_year = s
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .and_then(|d| d.rsplit('/').next())
        .is_some_and(|y| y.len() == 2);

    DATETIME_FORMATS
        .iter()
        .filter(|fmt| format_allowed(fmt, two_digit_year))
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .filter(|fmt| format_allowed(fmt, two_digit_year))
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn to_transaction(raw: RawTransaction) -> PipelineResult<Transaction> {
    let amount_text = raw.amount.unwrap_or_default();
    let amount = parse_amount(&amount_text).ok_or_else(|| PipelineError::MalformedAmount {
        line: raw.line,
        value: amount_text.clone(),
    })?;

    let date_text = raw.date.unwrap_or_default();
    let date = parse_date(&date_text)
        .filter(|d| WORKBOOK_YEARS.contains(&d.year()))
        .ok_or_else(|| PipelineError::MalformedDate {
            line: raw.line,
            value: date_text.clone(),
        })?;

    Ok(Transaction {
        date,
        description: raw.original_description.unwrap_or_default(),
        amount,
        category: raw.category_subcategory.unwrap_or_default(),
        account_name: raw.account_name.unwrap_or_default(),
        line: raw.line,
    })
}

/// Coerce every row and sort ascending by date. The sort is stable, so rows
/// sharing a date keep their file order.
pub fn normalize(rows: Vec<RawTransaction>) -> PipelineResult<Vec<Transaction>> {
    let mut txns = rows
        .into_iter()
        .map(to_transaction)
        .collect::<PipelineResult<Vec<_>>>()?;

    txns.sort_by_key(|t| t.date);
    info!(rows = txns.len(), "normalized transactions");
    Ok(txns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn raw(line: u64, date: &str, amount: &str) -> RawTransaction {
        RawTransaction::new(line)
            .with_date(date)
            .with_description(format!("row {line}"))
            .with_amount(amount)
            .with_category("Misc")
            .with_account("Checking")
            .with_status("posted")
    }

    #[test]
    fn test_parse_amount_strips_currency_and_grouping() {
        assert_eq!(parse_amount("$2,500.00"), Some(2500.0));
        assert_eq!(parse_amount("-$1,234.56"), Some(-1234.56));
        assert_eq!(parse_amount("12"), Some(12.0));
        assert_eq!(parse_amount(" -0.5 "), Some(-0.5));
    }

    #[test]
    fn test_parse_amount_rejects_junk() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("$"), None);
        assert_eq!(parse_amount("12 USD"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn test_parse_date_layouts() {
        assert_eq!(parse_date("01/15/2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("1/5/2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("1/5/24"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("2024-01-15"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("2024/01/15"), Some(ymd(2024, 1, 15)));

        let with_time = parse_date("2024-01-15 13:45:10").unwrap();
        assert_eq!(with_time.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(with_time.format("%H:%M:%S").to_string(), "13:45:10");
        assert!(parse_date("2024-01-15T08:30").is_some());
        assert!(parse_date("01/15/2024 08:30").is_some());
    }

    #[test]
    fn test_parse_date_rejects_junk() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("13/45/2024"), None);
    }

    #[test]
    fn test_normalize_projects_and_sorts_stably() {
        let rows = vec![
            raw(2, "03/02/2024", "1.00"),
            raw(3, "03/01/2024", "2.00"),
            raw(4, "03/02/2024", "3.00"),
            raw(5, "03/01/2024", "4.00"),
        ];

        let txns = normalize(rows).unwrap();
        let lines: Vec<_> = txns.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![3, 5, 2, 4]);
        assert_eq!(txns[0].description, "row 3");
        assert_eq!(txns[0].category, "Misc");
        for w in txns.windows(2) {
            assert!(w[0].date <= w[1].date);
        }
    }

    #[test]
    fn test_missing_text_fields_become_empty() {
        let row = RawTransaction::new(9).with_date("2024-01-01").with_amount("5");
        let txns = normalize(vec![row]).unwrap();
        assert_eq!(txns[0].description, "");
        assert_eq!(txns[0].account_name, "");
    }

    #[test]
    fn test_malformed_amount_reports_line_and_value() {
        let err = normalize(vec![raw(2, "01/01/2024", "1.00"), raw(3, "01/01/2024", "abc")])
            .unwrap_err();
        assert_eq!(
            err,
            PipelineError::MalformedAmount {
                line: 3,
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_missing_amount_is_malformed() {
        let row = RawTransaction::new(4).with_date("2024-01-01");
        let err = normalize(vec![row]).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedAmount { line: 4, .. }));
    }

    #[test]
    fn test_malformed_date_reports_line_and_value() {
        let err = normalize(vec![raw(7, "not a date", "1.00")]).unwrap_err();
        assert_eq!(
            err,
            PipelineError::MalformedDate {
                line: 7,
                value: "not a date".to_string()
            }
        );
    }

    #[test]
    fn test_dates_outside_workbook_years_are_malformed() {
        assert!(parse_date("01/15/1899").is_some());

        let err = normalize(vec![raw(6, "01/15/1899", "1.00")]).unwrap_err();
        assert_eq!(
            err,
            PipelineError::MalformedDate {
                line: 6,
                value: "01/15/1899".to_string()
            }
        );

        let edges = vec![raw(2, "1900-01-01", "1.00"), raw(3, "9999-12-31", "1.00")];
        assert_eq!(normalize(edges).unwrap().len(), 2);
    }
}
