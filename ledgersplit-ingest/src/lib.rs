//! ledgersplit-ingest: reads a transaction export CSV into raw typed rows.

pub mod loader;

pub use loader::{REQUIRED_COLUMNS, load_transactions};
