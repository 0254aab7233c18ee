use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::table::Table;

/// Maximum number of columns combined into one comparison value.
pub const MAX_SELECTED_COLUMNS: usize = 2;

/// Ordered list of one or two columns whose values are combined for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ColumnSelection {
    columns: Vec<String>,
}

impl ColumnSelection {
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(ModelError::EmptySelection);
        }
        if columns.len() > MAX_SELECTED_COLUMNS {
            return Err(ModelError::TooManyColumns {
                count: columns.len(),
                max: MAX_SELECTED_COLUMNS,
            });
        }
        for (index, column) in columns.iter().enumerate() {
            if columns[..index].contains(column) {
                return Err(ModelError::DuplicateColumn {
                    column: column.clone(),
                });
            }
        }
        Ok(Self { columns })
    }

    pub fn single(column: impl Into<String>) -> Self {
        Self {
            columns: vec![column.into()],
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }

    /// Column names joined with `" + "`, used in report headers.
    pub fn display_name(&self) -> String {
        self.columns.join(" + ")
    }

    /// Check every selected column exists in `table`.
    pub fn validate_against(&self, table: &Table) -> Result<()> {
        match self.columns.iter().find(|column| !table.has_column(column)) {
            Some(column) => Err(ModelError::UnknownColumn {
                column: column.clone(),
                table: table.name.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl TryFrom<Vec<String>> for ColumnSelection {
    type Error = ModelError;

    fn try_from(columns: Vec<String>) -> Result<Self> {
        Self::new(columns)
    }
}

impl From<ColumnSelection> for Vec<String> {
    fn from(selection: ColumnSelection) -> Self {
        selection.columns
    }
}
