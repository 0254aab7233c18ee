use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// One row of a source table: column name to value, in header order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new(fields: Vec<(String, CellValue)>) -> Self {
        Self { fields }
    }

    /// Value of `column`, or `None` when the record has no such column.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Text of `column`; missing columns read as an empty string.
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(CellValue::as_text).unwrap_or_default()
    }

    pub fn fields(&self) -> &[(String, CellValue)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// An input table loaded from one source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Display name, usually the file name.
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row given as values in header order.
    ///
    /// Short rows are padded with [`CellValue::Empty`]; extra values are dropped.
    pub fn push_values(&mut self, values: Vec<CellValue>) {
        let mut values = values.into_iter();
        let fields = self
            .columns
            .iter()
            .map(|column| (column.clone(), values.next().unwrap_or_default()))
            .collect();
        self.rows.push(Record::new(fields));
    }

    pub fn push_row(&mut self, row: Record) {
        self.rows.push(row);
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Copy of the first `n` rows.
    pub fn head(&self, n: usize) -> Table {
        Table {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_values_pads_short_rows() {
        let mut table = Table::new("inventory", vec!["Name".into(), "Version".into()]);
        table.push_values(vec![CellValue::from_text("Office")]);
        let row = &table.rows[0];
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("Version"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_missing_column_reads_empty() {
        let record: Record = [("Name", "Office")].into_iter().collect();
        assert_eq!(record.text("Name"), "Office");
        assert_eq!(record.text("Vendor"), "");
        assert!(record.get("Vendor").is_none());
    }

    #[test]
    fn test_head_keeps_header() {
        let mut table = Table::new("t", vec!["A".into()]);
        for value in ["x", "y", "z"] {
            table.push_values(vec![CellValue::from_text(value)]);
        }
        let head = table.head(2);
        assert_eq!(head.len(), 2);
        assert_eq!(head.columns, table.columns);
        assert_eq!(table.head(10).len(), 3);
    }
}
