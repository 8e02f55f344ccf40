//! Load a transaction export CSV.
//!
//! Expected header (extra columns are ignored, order does not matter):
//!   Date,Original Description,Amount,Category-Subcategory,Account Name,Status
//!
//! Example row:
//!   01/15/2024,Paycheck,"$2,500.00",Salary,Checking,posted

use std::io::Read;

use csv::StringRecord;
use ledgersplit_core::{PipelineError, PipelineResult, RawTransaction};
use tracing::{debug, info};

pub const DATE: &str = "Date";
pub const ORIGINAL_DESCRIPTION: &str = "Original Description";
pub const AMOUNT: &str = "Amount";
pub const CATEGORY_SUBCATEGORY: &str = "Category-Subcategory";
pub const ACCOUNT_NAME: &str = "Account Name";
pub const STATUS: &str = "Status";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    DATE,
    ORIGINAL_DESCRIPTION,
    AMOUNT,
    CATEGORY_SUBCATEGORY,
    ACCOUNT_NAME,
    STATUS,
];

/// Column positions of the required fields within the header
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    description: usize,
    amount: usize,
    category: usize,
    account: usize,
    status: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> PipelineResult<Self> {
        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == column)
                .ok_or(PipelineError::MissingColumn { column })?;
        }

        let [date, description, amount, category, account, status] = positions;
        Ok(Self {
            date,
            description,
            amount,
            category,
            account,
            status,
        })
    }
}

fn cell(record: &StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn parse_error(err: csv::Error) -> PipelineError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    PipelineError::Parse {
        line,
        message: err.to_string(),
    }
}

/// Parse an export into raw rows, keeping file order.
///
/// Rows shorter than the header are padded with empty cells; rows longer than
/// the header are rejected.
pub fn load_transactions(reader: impl Read) -> PipelineResult<Vec<RawTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(parse_error)?.clone();
    if headers.is_empty() {
        return Err(PipelineError::Parse {
            line: 1,
            message: "no columns to parse from file".to_string(),
        });
    }
    let cols = ColumnIndex::from_headers(&headers)?;
    debug!(columns = headers.len(), "header validated");

    let mut out = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(parse_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() > headers.len() {
            return Err(PipelineError::Parse {
                line,
                message: format!(
                    "expected {} fields, saw {}",
                    headers.len(),
                    record.len()
                ),
            });
        }

        out.push(RawTransaction {
            line,
            date: cell(&record, cols.date),
            original_description: cell(&record, cols.description),
            amount: cell(&record, cols.amount),
            category_subcategory: cell(&record, cols.category),
            account_name: cell(&record, cols.account),
            status: cell(&record, cols.status),
        });
    }

    info!(rows = out.len(), "loaded transactions");
    Ok(out)
}
