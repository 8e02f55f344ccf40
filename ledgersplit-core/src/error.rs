//! Error taxonomy for one export run. Every variant aborts the run.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Input is not readable as CSV (empty stream, bad UTF-8, ragged rows)
    #[error("Error reading file (line {line}): {message}")]
    Parse { line: u64, message: String },

    #[error("Missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("Malformed amount on line {line}: '{value}'")]
    MalformedAmount { line: u64, value: String },

    #[error("Malformed date on line {line}: '{value}'")]
    MalformedDate { line: u64, value: String },

    /// Nothing survived filtering, so there is no month to name the file after
    #[error("No transactions left after filtering; nothing to export")]
    EmptyResult,

    #[error("Failed to build workbook: {0}")]
    Workbook(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
