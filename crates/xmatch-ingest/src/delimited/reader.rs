//! Delimited text parsing into a [`Table`].

use std::path::Path;

use tracing::debug;
use xmatch_model::{CellValue, Table};

use crate::error::{IngestError, Result};
use crate::header::clean_headers;

/// Delimiters considered by [`sniff_delimiter`], in tie-break order.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b'\t', b';', b',', b'|'];

const SNIFF_LINES: usize = 10;

/// Guess the field delimiter from the first lines of `text`.
///
/// A delimiter scores `consistent_lines * fields` where `fields` is the
/// field count of the first line. Delimiters that never split the first
/// line are ignored; falls back to a comma.
pub fn sniff_delimiter(text: &str) -> u8 {
    let sample: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();
    if sample.is_empty() {
        return b',';
    }
    let sample = sample.join("\n");

    let mut best = b',';
    let mut best_score = 0;
    for delimiter in CANDIDATE_DELIMITERS {
        let counts: Vec<usize> = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(sample.as_bytes())
            .records()
            .map_while(std::result::Result::ok)
            .map(|record| record.len())
            .collect();
        let Some(&target) = counts.first() else {
            continue;
        };
        if target < 2 {
            continue;
        }
        let consistent = counts.iter().filter(|&&count| count == target).count();
        let score = consistent * target;
        if score > best_score {
            best_score = score;
            best = delimiter;
        }
    }
    best
}

/// Parse decoded text into a table named `name`.
///
/// The first non-blank record is the header. Records whose fields are all
/// blank are skipped. With `row_limit`, stops after that many data rows.
pub fn parse_table(
    text: &str,
    delimiter: u8,
    name: &str,
    path: &Path,
    row_limit: Option<usize>,
) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records().filter(|record| match record {
        Ok(record) => record.iter().any(|field| !field.trim().is_empty()),
        Err(_) => true,
    });

    let header = match records.next() {
        Some(record) => record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?,
        None => {
            return Err(IngestError::EmptyFile {
                path: path.to_path_buf(),
            });
        }
    };
    let mut table = Table::new(name, clean_headers(header.iter()));

    let limit = row_limit.unwrap_or(usize::MAX);
    for record in records.take(limit) {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        table.push_values(record.iter().map(CellValue::from_text).collect());
    }

    debug!(
        path = %path.display(),
        delimiter = %char::from(delimiter).escape_default(),
        columns = table.columns.len(),
        rows = table.len(),
        "delimited text parsed"
    );
    Ok(table)
}
