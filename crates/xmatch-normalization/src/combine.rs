//! Building comparison values from selected columns.

use xmatch_model::{ColumnSelection, Record, Table};

use crate::normalize::normalize;
use crate::options::NormalizationOptions;

/// Join the non-blank values of `columns` with a single space, in the given order.
///
/// Columns missing from the record are skipped. Returns an empty string
/// when no column yields a usable value.
pub fn combine_columns<S: AsRef<str>>(record: &Record, columns: &[S]) -> String {
    columns
        .iter()
        .filter_map(|column| record.get(column.as_ref()))
        .filter(|value| !value.is_blank())
        .map(|value| value.as_text().trim().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Combined value of a record and its normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonKey {
    pub original: String,
    pub normalized: String,
}

impl ComparisonKey {
    pub fn new(original: String, options: &NormalizationOptions) -> Self {
        let normalized = normalize(&original, options);
        Self {
            original,
            normalized,
        }
    }

    /// True when normalization left nothing to compare.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// One key per table row, in row order.
pub fn comparison_keys(
    table: &Table,
    selection: &ColumnSelection,
    options: &NormalizationOptions,
) -> Vec<ComparisonKey> {
    table
        .rows
        .iter()
        .map(|row| ComparisonKey::new(combine_columns(row, selection.columns()), options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmatch_model::CellValue;

    fn record() -> Record {
        Record::new(vec![
            ("Name".into(), CellValue::from_text("Office")),
            ("Version".into(), CellValue::Number(2021.0)),
            ("X".into(), CellValue::from_text("ignored")),
        ])
    }

    #[test]
    fn test_combine_in_selection_order() {
        assert_eq!(combine_columns(&record(), &["Name", "Version"]), "Office 2021");
        assert_eq!(combine_columns(&record(), &["Version", "Name"]), "2021 Office");
    }

    #[test]
    fn test_combine_skips_blank_and_missing() {
        let record = Record::new(vec![
            ("Name".into(), CellValue::from_text("  Visio ")),
            ("Version".into(), CellValue::Number(f64::NAN)),
        ]);
        assert_eq!(combine_columns(&record, &["Name", "Version", "Vendor"]), "Visio");
        assert_eq!(combine_columns(&record, &["Version"]), "");
    }

    #[test]
    fn test_comparison_keys_follow_rows() {
        let mut table = Table::new("t", vec!["Name".into()]);
        table.push_values(vec![CellValue::from_text("Adobe Reader")]);
        table.push_values(vec![CellValue::Empty]);
        let keys = comparison_keys(
            &table,
            &ColumnSelection::single("Name"),
            &NormalizationOptions::default(),
        );
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].original, "Adobe Reader");
        assert_eq!(keys[0].normalized, "adobe reader");
        assert!(keys[1].is_empty());
    }
}
