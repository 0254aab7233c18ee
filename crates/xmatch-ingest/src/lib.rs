//! Source table loading.
//!
//! Reads the two inputs of a matching run into [`xmatch_model::Table`]s.
//!
//! # Features
//!
//! - **Delimited text**: encoding fallback (`utf-8-sig`, `utf-8`,
//!   `windows-1251`, `latin1` by default), delimiter sniffing, header cleanup
//! - **Spreadsheets**: xlsx, xls, xlsb and ods through calamine
//! - **Header preview**: column names without reading data rows
//! - **Validation**: a yes/no check with a human-readable summary
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use xmatch_ingest::{IngestOptions, load_table, read_headers};
//!
//! let options = IngestOptions::default();
//! let columns = read_headers(Path::new("inventory.csv"), &options)?;
//! let table = load_table(Path::new("inventory.csv"), &options)?;
//! ```

mod delimited;
mod error;
mod header;
mod loader;
mod options;
mod spreadsheet;

// === Error Types ===
pub use error::{IngestError, Result};

// === Options ===
pub use options::{IngestOptions, MAX_FILE_SIZE, TextEncoding};

// === Loading ===
pub use loader::{SourceCheck, check_file_size, load_table, read_headers, validate_source};

// === Format Readers ===
pub use delimited::{CANDIDATE_DELIMITERS, decode, decode_with, parse_table, sniff_delimiter};
pub use header::clean_headers;
pub use spreadsheet::{SPREADSHEET_EXTENSIONS, is_spreadsheet, read_spreadsheet};
