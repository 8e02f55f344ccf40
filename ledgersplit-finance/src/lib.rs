//! ledgersplit-finance: exclusion rules, normalization, income/expense split
//! and the styled workbook export.

pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod rules;
pub mod split;

pub use export::{output_filename, write_workbook};
pub use normalize::{normalize, parse_amount, parse_date};
pub use pipeline::{ExportedWorkbook, process_export};
pub use rules::{ExclusionRule, FilterReport, apply_exclusions, exclusion_rules};
pub use split::{Split, split_ledgers};
