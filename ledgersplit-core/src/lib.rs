//! ledgersplit-core: typed records, ledgers, errors and progress checkpoints
//! shared by the ingest and finance crates.

pub mod error;
pub mod ledger;
pub mod progress;
pub mod transaction;

pub use error::{PipelineError, PipelineResult};
pub use ledger::{Ledger, LedgerEntry, LedgerKind};
pub use progress::{Checkpoint, NoProgress, ProgressSink};
pub use transaction::{RawTransaction, Transaction};

/// MIME type of the produced workbook.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
