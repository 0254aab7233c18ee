//! Scalar cell values read from a source table.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single cell of an input table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Build a value from raw delimited text. Empty text becomes [`CellValue::Empty`].
    pub fn from_text(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Empty
        } else {
            Self::Text(raw.to_string())
        }
    }

    /// String form used for comparison and reporting.
    ///
    /// `Empty` and NaN numbers render as an empty string.
    pub fn as_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Number(value) if value.is_nan() => String::new(),
            Self::Number(value) => format_numeric(*value),
            Self::Bool(value) => value.to_string(),
            Self::DateTime(value) if value.time() == NaiveTime::MIN => {
                value.format("%Y-%m-%d").to_string()
            }
            Self::DateTime(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// True when the value carries nothing usable after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(value) => value.is_nan(),
            Self::Bool(_) | Self::DateTime(_) => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::from_text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Formats a floating-point number without trailing zeros after the decimal point.
///
/// ```
/// use xmatch_model::format_numeric;
///
/// assert_eq!(format_numeric(2021.0), "2021");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_nan_is_blank() {
        let value = CellValue::Number(f64::NAN);
        assert!(value.is_blank());
        assert_eq!(value.as_text(), "");
    }

    #[test]
    fn test_whole_numbers_drop_fraction() {
        assert_eq!(CellValue::Number(2021.0).as_text(), "2021");
        assert_eq!(CellValue::Number(8.25).as_text(), "8.25");
    }

    #[test]
    fn test_whitespace_text_is_blank() {
        assert!(CellValue::from_text("   ").is_blank());
        assert!(!CellValue::from_text(" x ").is_blank());
        assert_eq!(CellValue::from_text(""), CellValue::Empty);
    }

    #[test]
    fn test_midnight_renders_as_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_time(NaiveTime::MIN);
        assert_eq!(CellValue::DateTime(date).as_text(), "2024-03-01");
    }
}
