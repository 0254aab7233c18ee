//! Spreadsheet reading (xlsx, xlsm, xlsb, xls, ods) through calamine.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::debug;
use xmatch_model::{CellValue, Table};

use crate::error::{IngestError, Result};
use crate::header::clean_headers;

/// File extensions read as spreadsheets, lower case.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// True when `path` has a spreadsheet extension.
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Convert one spreadsheet cell.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(text) => CellValue::from_text(text),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Float(value) => CellValue::Number(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(value) => value
            .as_datetime()
            .map_or(CellValue::Empty, CellValue::DateTime),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::from_text(text),
    }
}

fn spreadsheet_error(path: &Path, error: impl std::fmt::Display) -> IngestError {
    IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

fn read_range(path: &Path, sheet: Option<&str>) -> Result<Range<Data>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(path, e))?;
    match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|known| known == name) {
                return Err(IngestError::SheetNotFound {
                    path: path.to_path_buf(),
                    sheet: name.to_string(),
                });
            }
            workbook
                .worksheet_range(name)
                .map_err(|e| spreadsheet_error(path, e))
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| IngestError::EmptyFile {
                path: path.to_path_buf(),
            })?
            .map_err(|e| spreadsheet_error(path, e)),
    }
}

/// Read a worksheet into a table named `name`.
///
/// The first row with any non-empty cell is the header; fully empty rows
/// are skipped. With `row_limit`, stops after that many data rows.
pub fn read_spreadsheet(
    path: &Path,
    sheet: Option<&str>,
    name: &str,
    row_limit: Option<usize>,
) -> Result<Table> {
    let range = read_range(path, sheet)?;
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_value).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|value| !value.is_blank()));

    let header = rows.next().ok_or_else(|| IngestError::EmptyFile {
        path: path.to_path_buf(),
    })?;
    let mut table = Table::new(name, clean_headers(header.iter().map(CellValue::as_text)));
    for row in rows.take(row_limit.unwrap_or(usize::MAX)) {
        table.push_values(row);
    }

    debug!(
        path = %path.display(),
        sheet = sheet.unwrap_or("<first>"),
        columns = table.columns.len(),
        rows = table.len(),
        "spreadsheet read"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_spreadsheet() {
        assert!(is_spreadsheet(Path::new("a.XLSX")));
        assert!(is_spreadsheet(Path::new("dir/a.ods")));
        assert!(!is_spreadsheet(Path::new("a.csv")));
        assert!(!is_spreadsheet(Path::new("xlsx")));
    }

    #[test]
    fn test_cell_values() {
        assert_eq!(cell_value(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(
            cell_value(&Data::String("Office".into())),
            CellValue::Text("Office".into())
        );
        assert_eq!(cell_value(&Data::String(String::new())), CellValue::Empty);
    }
}
