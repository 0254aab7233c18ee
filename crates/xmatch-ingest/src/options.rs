//! Loader options.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default size limit for input files (500 MB).
pub const MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Text encodings tried when reading delimited files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    /// UTF-8 with an optional byte-order mark.
    #[serde(rename = "utf-8-sig")]
    Utf8Sig,
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "windows-1251", alias = "cp1251")]
    Windows1251,
    /// ISO-8859-1. Every byte sequence decodes.
    #[serde(rename = "latin1", alias = "iso-8859-1")]
    Latin1,
}

impl TextEncoding {
    /// Fallback order used when none is configured.
    pub const DEFAULT_ORDER: [TextEncoding; 4] =
        [Self::Utf8Sig, Self::Utf8, Self::Windows1251, Self::Latin1];

    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8Sig => "utf-8-sig",
            Self::Utf8 => "utf-8",
            Self::Windows1251 => "windows-1251",
            Self::Latin1 => "latin1",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How source files are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Encodings tried in order for delimited text; the first that decodes wins.
    pub encodings: Vec<TextEncoding>,
    /// Field delimiter for delimited text. Sniffed when unset.
    pub delimiter: Option<char>,
    /// Worksheet to read from spreadsheets. The first sheet when unset.
    pub sheet: Option<String>,
    /// Files larger than this many bytes are rejected.
    pub max_file_size: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            encodings: TextEncoding::DEFAULT_ORDER.to_vec(),
            delimiter: None,
            sheet: None,
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    #[must_use]
    pub fn with_encodings(mut self, encodings: Vec<TextEncoding>) -> Self {
        self.encodings = encodings;
        self
    }

    /// Encodings to try, falling back to the default order when none are set.
    pub fn encoding_order(&self) -> &[TextEncoding] {
        if self.encodings.is_empty() {
            &TextEncoding::DEFAULT_ORDER
        } else {
            &self.encodings
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        encodings: Vec<TextEncoding>,
    }

    #[test]
    fn test_encoding_names() {
        let parsed: Wrapper =
            serde_json::from_str(r#"{"encodings": ["utf-8-sig", "cp1251", "latin1"]}"#).unwrap();
        assert_eq!(
            parsed.encodings,
            [
                TextEncoding::Utf8Sig,
                TextEncoding::Windows1251,
                TextEncoding::Latin1
            ]
        );
    }

    #[test]
    fn test_empty_order_uses_default() {
        let options = IngestOptions::default().with_encodings(vec![]);
        assert_eq!(options.encoding_order(), &TextEncoding::DEFAULT_ORDER);
    }
}
