//! Styled two-sheet workbook export.
//!
//! Every cell, header included, gets a dark fill, white text and a thin white
//! border. Column widths fit the longest rendered value plus two characters.

use chrono::{Datelike, NaiveDate};
use ledgersplit_core::{Ledger, LedgerEntry, PipelineError, PipelineResult};
use rust_xlsxwriter::{Color, ExcelDateTime, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::info;

use crate::split::Split;

pub const HEADERS: [&str; 5] = [
    "Date",
    "Original Description",
    "Amount",
    "Category",
    "Account Name",
];

const BACKGROUND: u32 = 0x333333;
const DATE_FORMAT: &str = "yyyy-mm-dd";
const WIDTH_PADDING: usize = 2;

fn workbook_error(err: XlsxError) -> PipelineError {
    PipelineError::Workbook(err.to_string())
}

/// `January-2024`
pub fn month_year(date: NaiveDate) -> String {
    date.format("%B-%Y").to_string()
}

/// `January-2024.xlsx`
pub fn output_filename(date: NaiveDate) -> String {
    format!("{}.xlsx", month_year(date))
}

/// Amounts render with at least one fractional digit: `2500.0`, `1234.56`.
///
/// `f64` Display never switches to exponent notation, so magnitudes of 1e16
/// and up print every integer digit (`10000000000000000.0`, not `1e+16`).
pub fn render_amount(amount: f64) -> String {
    let mut s = amount.to_string();
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}

enum Cell<'a> {
    Date(NaiveDate),
    Text(&'a str),
    Amount(f64),
}

impl Cell<'_> {
    /// Rendered length used for auto-fit; blank text counts as zero.
    fn width(&self) -> usize {
        match self {
            Cell::Date(d) => d.format("%Y-%m-%d").to_string().chars().count(),
            Cell::Text(s) => s.chars().count(),
            Cell::Amount(v) => render_amount(*v).chars().count(),
        }
    }
}

fn cells(entry: &LedgerEntry) -> [Cell<'_>; 5] {
    [
        Cell::Date(entry.date),
        Cell::Text(&entry.description),
        Cell::Amount(entry.amount),
        Cell::Text(&entry.category),
        Cell::Text(&entry.account_name),
    ]
}

struct Styles {
    cell: Format,
    date: Format,
}

impl Styles {
    fn new() -> Self {
        let cell = Format::new()
            .set_background_color(Color::RGB(BACKGROUND))
            .set_font_color(Color::White)
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::White);
        let date = cell.clone().set_num_format(DATE_FORMAT);
        Self { cell, date }
    }
}

fn to_excel_date(date: NaiveDate) -> PipelineResult<ExcelDateTime> {
    let year = u16::try_from(date.year())
        .map_err(|_| PipelineError::Workbook(format!("year out of range: {date}")))?;
    // month and day always fit in u8
    ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8).map_err(workbook_error)
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell<'_>,
    styles: &Styles,
) -> PipelineResult<()> {
    match cell {
        Cell::Date(d) => {
            sheet
                .write_datetime_with_format(row, col, &to_excel_date(*d)?, &styles.date)
                .map_err(workbook_error)?;
        }
        Cell::Amount(v) => {
            sheet
                .write_number_with_format(row, col, *v, &styles.cell)
                .map_err(workbook_error)?;
        }
        Cell::Text(s) if s.is_empty() => {
            sheet.write_blank(row, col, &styles.cell).map_err(workbook_error)?;
        }
        Cell::Text(s) => {
            sheet
                .write_string_with_format(row, col, *s, &styles.cell)
                .map_err(workbook_error)?;
        }
    }
    Ok(())
}

fn write_ledger(sheet: &mut Worksheet, ledger: &Ledger, styles: &Styles) -> PipelineResult<()> {
    sheet
        .set_name(ledger.kind.sheet_name())
        .map_err(workbook_error)?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &styles.cell)
            .map_err(workbook_error)?;
    }

    for (i, entry) in ledger.entries.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, cell) in cells(entry).iter().enumerate() {
            write_cell(sheet, row, col as u16, cell, styles)?;
        }
    }

    for (col, width) in column_widths(ledger).iter().enumerate() {
        sheet
            .set_column_width(col as u16, *width as f64)
            .map_err(workbook_error)?;
    }
    Ok(())
}

/// Column widths (in characters) the export assigns to a ledger's sheet.
pub fn column_widths(ledger: &Ledger) -> [usize; 5] {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for entry in &ledger.entries {
        for (col, cell) in cells(entry).iter().enumerate() {
            widths[col] = widths[col].max(cell.width());
        }
    }
    widths.map(|w| w + WIDTH_PADDING)
}

/// Build the Income and Expenses sheets and return the finished file bytes.
pub fn write_workbook(split: &Split) -> PipelineResult<Vec<u8>> {
    let styles = Styles::new();
    let mut workbook = Workbook::new();

    for ledger in [&split.income, &split.expenses] {
        let sheet = workbook.add_worksheet();
        write_ledger(sheet, ledger, &styles)?;
    }

    let bytes = workbook.save_to_buffer().map_err(workbook_error)?;
    info!(bytes = bytes.len(), "workbook written");
    Ok(bytes)
}
