//! Column layout of a results table, shared by the XLSX and CSV writers.

use xmatch_model::MatchRow;

/// Role of a report column, which decides its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    RowNumber,
    Value,
    Score,
    Method,
    Inherited,
}

impl ColumnKind {
    /// Column width in Excel character units.
    pub fn width(self) -> f64 {
        match self {
            Self::RowNumber => 8.0,
            Self::Value => 45.0,
            Self::Score => 12.0,
            Self::Method => 35.0,
            Self::Inherited => 20.0,
        }
    }
}

/// One output cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(value) => xmatch_model::format_numeric(*value),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Header and cell order for a set of result rows.
#[derive(Debug, Clone)]
pub struct ResultLayout {
    columns: Vec<(String, ColumnKind)>,
}

impl ResultLayout {
    /// Build the layout from the value labels and the first row's inherited fields.
    ///
    /// Every row of one run carries the same inherited field names.
    pub fn new(source1_label: &str, source2_label: &str, sample: Option<&MatchRow>) -> Self {
        let mut columns = vec![
            ("#".to_string(), ColumnKind::RowNumber),
            (format!("Source 1: {source1_label}"), ColumnKind::Value),
            (format!("Source 2: {source2_label}"), ColumnKind::Value),
            ("Match %".to_string(), ColumnKind::Score),
            ("Method".to_string(), ColumnKind::Method),
        ];
        if let Some(row) = sample {
            columns.extend(
                row.source1_fields
                    .iter()
                    .map(|(name, _)| (format!("Source 1: {name}"), ColumnKind::Inherited)),
            );
            columns.extend(
                row.source2_fields
                    .iter()
                    .map(|(name, _)| (format!("Source 2: {name}"), ColumnKind::Inherited)),
            );
        }
        Self { columns }
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn kinds(&self) -> impl Iterator<Item = ColumnKind> + '_ {
        self.columns.iter().map(|(_, kind)| *kind)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Cells of `row`, numbered from 1 by `position`.
    pub fn cells(&self, position: usize, row: &MatchRow) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.columns.len());
        cells.push(Cell::Number(position as f64));
        cells.push(Cell::Text(row.source1_value.clone()));
        cells.push(Cell::Text(row.source2_value.clone()));
        cells.push(Cell::Number(row.score));
        cells.push(Cell::Text(row.method.clone()));
        cells.extend(
            row.source1_fields
                .iter()
                .chain(&row.source2_fields)
                .map(|(_, value)| Cell::Text(value.clone())),
        );
        cells.resize(self.columns.len(), Cell::Text(String::new()));
        cells
    }
}
