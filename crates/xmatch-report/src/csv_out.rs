//! Plain CSV output.

use std::path::Path;

use xmatch_model::MatchRow;

use crate::error::{ReportError, Result};
use crate::layout::{Cell, ResultLayout};

fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> ReportError + '_ {
    move |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `rows` as UTF-8 CSV with the same columns as the XLSX report.
pub(crate) fn write_results_csv(
    path: &Path,
    layout: &ResultLayout,
    rows: &[&MatchRow],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error(path))?;
    writer
        .write_record(layout.headers())
        .map_err(csv_error(path))?;
    for (index, row) in rows.iter().enumerate() {
        let cells = layout.cells(index + 1, row);
        writer
            .write_record(cells.iter().map(Cell::as_text))
            .map_err(csv_error(path))?;
    }
    writer.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a header and string records.
pub(crate) fn write_table_csv(
    path: &Path,
    headers: &[&str],
    records: &[Vec<String>],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error(path))?;
    writer.write_record(headers).map_err(csv_error(path))?;
    for record in records {
        writer.write_record(record).map_err(csv_error(path))?;
    }
    writer.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
