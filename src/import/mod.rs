//! Borehole table import
//!
//! - `columns.rs` - header recognition strategy and the alias matcher
//! - `table.rs` - CSV/Parquet/Excel reading, row grouping, import statistics

pub mod columns;
pub mod table;

pub use columns::{normalize_header, AliasColumnMatcher, ColumnMapping, ColumnMatcher, StandardColumn};
pub use table::{import_frame, read_table, ColumnStats, ImportSummary, ImportedPoint, ImportedTable};

/// Import failures the caller may want to react to (e.g. show the
/// unidentified columns)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImportError {
    #[error("required columns not identified: {}", format_columns(.0))]
    MissingColumns(Vec<StandardColumn>),

    #[error("row {row}: missing value in column '{column}'")]
    MissingValue { row: usize, column: String },

    #[error("row {row}: '{value}' in column '{column}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("unsupported table format '{0}' (expected csv, parquet, xlsx or xls)")]
    UnsupportedFormat(String),
}

fn format_columns(columns: &[StandardColumn]) -> String {
    columns
        .iter()
        .map(|c| c.standard_name())
        .collect::<Vec<_>>()
        .join(", ")
}
