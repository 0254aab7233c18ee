//! Delimited text reading.

mod decode;
mod reader;

pub use decode::{decode, decode_with};
pub use reader::{CANDIDATE_DELIMITERS, parse_table, sniff_delimiter};
