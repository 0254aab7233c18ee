//! Format dispatch and source validation.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};
use xmatch_model::Table;

use crate::delimited::{decode, parse_table, sniff_delimiter};
use crate::error::{IngestError, Result};
use crate::options::IngestOptions;
use crate::spreadsheet::{is_spreadsheet, read_spreadsheet};

/// Number of column names shown in a [`SourceCheck`] message.
const PREVIEW_COLUMNS: usize = 5;

/// Check file size before loading.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::io(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

fn table_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

fn read(path: &Path, options: &IngestOptions, row_limit: Option<usize>) -> Result<Table> {
    check_file_size(path, options.max_file_size)?;
    let name = table_name(path);

    if is_spreadsheet(path) {
        return read_spreadsheet(path, options.sheet.as_deref(), &name, row_limit);
    }

    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    let (text, _) = decode(&bytes, options.encoding_order(), path)?;
    let delimiter = match options.delimiter {
        Some(delimiter) if delimiter.is_ascii() => delimiter as u8,
        Some(delimiter) => {
            warn!(%delimiter, "non-ASCII delimiter ignored, sniffing instead");
            sniff_delimiter(&text)
        }
        None => sniff_delimiter(&text),
    };
    parse_table(&text, delimiter, &name, path, row_limit)
}

/// Load every row of a source file.
///
/// Spreadsheet extensions go through calamine; anything else is read as
/// delimited text with the configured encoding fallback.
pub fn load_table(path: &Path, options: &IngestOptions) -> Result<Table> {
    let table = read(path, options, None)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns.len(),
        "table loaded"
    );
    Ok(table)
}

/// Column names of a source file, without reading its data rows.
pub fn read_headers(path: &Path, options: &IngestOptions) -> Result<Vec<String>> {
    read(path, options, Some(0)).map(|table| table.columns)
}

/// Outcome of [`validate_source`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCheck {
    pub valid: bool,
    /// Human-readable summary or the reason the file was rejected.
    pub message: String,
    pub rows: usize,
    pub columns: Vec<String>,
}

impl SourceCheck {
    fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
            rows: 0,
            columns: Vec::new(),
        }
    }
}

/// Check that a file loads and has at least one column and one data row.
///
/// Read errors are reported in the returned check, not as `Err`.
pub fn validate_source(path: &Path, options: &IngestOptions) -> SourceCheck {
    let table = match read(path, options, None) {
        Ok(table) => table,
        Err(IngestError::EmptyFile { .. }) => return SourceCheck::rejected("file is empty"),
        Err(error) => return SourceCheck::rejected(format!("failed to read file: {error}")),
    };
    if table.columns.is_empty() {
        return SourceCheck::rejected("file has no columns");
    }
    if table.is_empty() {
        return SourceCheck {
            valid: false,
            message: "file has no data rows".to_string(),
            rows: 0,
            columns: table.columns,
        };
    }

    let mut preview = table
        .columns
        .iter()
        .take(PREVIEW_COLUMNS)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if table.columns.len() > PREVIEW_COLUMNS {
        preview.push_str(", ...");
    }
    SourceCheck {
        valid: true,
        message: format!(
            "{} rows, {} columns: {preview}",
            table.len(),
            table.columns.len()
        ),
        rows: table.len(),
        columns: table.columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_is_file_name() {
        assert_eq!(table_name(Path::new("/data/inventory.csv")), "inventory.csv");
    }

    #[test]
    fn test_missing_file() {
        let result = load_table(Path::new("/nonexistent/input.csv"), &IngestOptions::default());
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
