//! Data model for cross-source matching.
//!
//! Tables and records read from the two inputs, the column selection used
//! to build comparison values, and the match results with their score bands.

pub mod band;
pub mod error;
pub mod outcome;
pub mod selection;
pub mod table;
pub mod value;

pub use band::ScoreBand;
pub use error::{ModelError, Result};
pub use outcome::{MatchRow, MatchStatistics};
pub use selection::{ColumnSelection, MAX_SELECTED_COLUMNS};
pub use table::{Record, Table};
pub use value::{CellValue, format_numeric};
