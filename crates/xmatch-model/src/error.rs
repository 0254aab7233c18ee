use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("column selection is empty")]
    EmptySelection,
    #[error("at most {max} columns can be combined, got {count}")]
    TooManyColumns { count: usize, max: usize },
    #[error("column '{column}' is selected twice")]
    DuplicateColumn { column: String },
    #[error("column '{column}' not found in {table}")]
    UnknownColumn { column: String, table: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
