//! One export run: load, exclude, normalize, split, write.
//!
//! Any stage error aborts the run and nothing is produced.

use std::io::Read;

use ledgersplit_core::{Checkpoint, PipelineError, PipelineResult, ProgressSink, XLSX_MIME};
use ledgersplit_ingest::load_transactions;
use serde::Serialize;
use tracing::info;

use crate::export::{month_year, output_filename, write_workbook};
use crate::normalize::normalize;
use crate::rules::apply_exclusions;
use crate::split::split_ledgers;

/// The finished spreadsheet, ready to hand out as a download.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedWorkbook {
    pub filename: String,
    pub month_year: String,
    pub mime: &'static str,
    pub income_rows: usize,
    pub expense_rows: usize,
    pub income_total: f64,
    pub expense_total: f64,
    pub excluded_rows: usize,
    pub excluded_by_rule: Vec<(&'static str, usize)>,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Run the whole transform over one CSV export.
pub fn process_export(
    input: impl Read,
    progress: &mut dyn ProgressSink,
) -> PipelineResult<ExportedWorkbook> {
    progress.report(Checkpoint::Started);
    let raw = load_transactions(input)?;

    let (kept, report) = apply_exclusions(raw);
    progress.report(Checkpoint::Cleaned);

    let txns = normalize(kept)?;
    progress.report(Checkpoint::Splitting);

    let split = split_ledgers(&txns);

    progress.report(Checkpoint::Saving);
    // Named after the earliest surviving transaction, not per ledger
    let first = txns.first().ok_or(PipelineError::EmptyResult)?.date.date();
    let bytes = write_workbook(&split)?;

    let out = ExportedWorkbook {
        filename: output_filename(first),
        month_year: month_year(first),
        mime: XLSX_MIME,
        income_rows: split.income.len(),
        expense_rows: split.expenses.len(),
        income_total: split.income.total(),
        expense_total: split.expenses.total(),
        excluded_rows: report.total_dropped(),
        excluded_by_rule: report.dropped,
        bytes,
    };
    progress.report(Checkpoint::Complete);

    info!(
        filename = %out.filename,
        income = out.income_rows,
        expenses = out.expense_rows,
        "export complete"
    );
    Ok(out)
}
