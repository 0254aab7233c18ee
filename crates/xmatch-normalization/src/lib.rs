//! String normalization for fuzzy matching.
//!
//! Turns raw cell values into canonical comparison strings:
//!
//! - **Combining**: join one or two selected columns of a record
//! - **Normalization**: fixed-order pipeline driven by [`NormalizationOptions`]
//! - **Transliteration**: Cyrillic to Latin approximation

mod combine;
mod error;
mod normalize;
mod options;
mod patterns;
mod transliterate;

// === Error Types ===
pub use error::{NormalizationError, Result};

// === Options ===
pub use options::NormalizationOptions;

// === Pipeline ===
pub use normalize::{collapse_whitespace, normalize};
pub use transliterate::{needs_transliteration, transliterate};

// === Column Combining ===
pub use combine::{ComparisonKey, combine_columns, comparison_keys};
