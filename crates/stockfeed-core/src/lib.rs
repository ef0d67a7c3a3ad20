//! Core contracts and helpers for Stockfeed.
//!
//! This crate defines the product record, the tabular column contract,
//! size-label parsing and the validation helpers shared by the generator,
//! the feed reader and the CLI.

pub mod columns;
pub mod error;
pub mod record;
pub mod size;
pub mod summary;
pub mod validation;

pub use columns::{COLUMNS, COLUMN_COUNT, ColumnKind, ColumnSpec, SHEET_NAME, column_names};
pub use error::{Error, Result};
pub use record::{CellValue, ProductRecord};
pub use size::{is_valid_pair, parse_size_gb};
pub use summary::{DEFAULT_LOW_STOCK_THRESHOLD, FeedSummary, render_summary, summarize};
pub use validation::{
    IMEI_LEN, MAX_STOCK, SERIAL_PREFIX_LEN, SERIAL_SUFFIX_LEN, serial_prefix, validate_record,
    validate_records,
};
