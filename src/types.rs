//! Movie/Credits Loader - Type System
//!
//! - `table`: In-memory `Table` and `Cell` passed between pipeline steps
//! - `records`: Typed `CombinedRecord` view over the cleaned projection
//! - `statistics`: Run counters, timing and join diagnostics

pub mod records;
pub mod statistics;
pub mod table;

pub use records::{structured_names, CombinedRecord, COMBINED_COLUMNS};
pub use statistics::{JoinDiagnostics, PipelineStats, TimingInfo};
pub use table::{Cell, ColumnType, Table};
