use thiserror::Error;

/// Failure inside a single normalization step.
///
/// Never escapes [`crate::normalize`]; the failing step is skipped instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("no Latin transliteration for '{character}' (U+{code:04X})")]
    Transliteration { character: char, code: u32 },
}

pub type Result<T> = std::result::Result<T, NormalizationError>;
