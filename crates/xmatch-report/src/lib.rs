//! Match result reports.
//!
//! - **Results**: one line per source-1 record, coloured by score band, with
//!   an optional statistics sheet ([`write_results`])
//! - **Method ranking**: sample or full comparison table ([`write_comparison`])
//! - **Full comparison**: summary plus one sheet per method
//!   ([`write_full_comparison`])
//!
//! Paths ending in `.xlsx` get a styled workbook; anything else is written as
//! CSV, except full comparisons which are always workbooks.

mod comparison;
mod csv_out;
mod error;
mod layout;
mod options;
mod xlsx;

use std::path::Path;

use tracing::info;
use xmatch_model::{MatchRow, MatchStatistics};

// === Error Types ===
pub use error::{ReportError, Result};

// === Options ===
pub use options::{ExportFilter, ReportOptions};

// === Layout ===
pub use layout::{Cell, ColumnKind, ResultLayout};
pub use xlsx::{MAX_SHEET_NAME_LEN, sanitize_sheet_name, unique_sheet_names};

// === Comparisons ===
pub use comparison::{ranking_headers, ranking_record, write_comparison, write_full_comparison};

/// True when `path` should be written as a workbook.
pub fn is_xlsx_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

/// Write the rows selected by `options.filter`.
///
/// `stats` describes the whole result set and goes into the statistics
/// sheet when `options.include_statistics` is set. Returns the number of
/// rows written.
pub fn write_results(
    path: &Path,
    rows: &[MatchRow],
    stats: &MatchStatistics,
    options: &ReportOptions,
) -> Result<usize> {
    let selected = options.filter.apply(rows);
    let layout = ResultLayout::new(&options.source1_label, &options.source2_label, rows.first());

    if is_xlsx_path(path) {
        let stats = options.include_statistics.then_some(stats);
        xlsx::write_results_workbook(path, &layout, &selected, stats)?;
    } else {
        csv_out::write_results_csv(path, &layout, &selected)?;
    }
    info!(
        path = %path.display(),
        rows = selected.len(),
        filter = options.filter.label(),
        "results written"
    );
    Ok(selected.len())
}
