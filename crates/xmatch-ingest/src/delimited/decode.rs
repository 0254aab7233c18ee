//! Byte decoding with an ordered encoding fallback.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::options::TextEncoding;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The one byte windows-1251 leaves unassigned.
const CP1251_UNDEFINED: u8 = 0x98;

/// Reject byte-order marks of encodings outside the fallback list.
fn check_bom(bytes: &[u8], path: &Path) -> Result<()> {
    let encoding = match bytes {
        [0xFF, 0xFE, ..] => "UTF-16 LE",
        [0xFE, 0xFF, ..] => "UTF-16 BE",
        _ => return Ok(()),
    };
    Err(IngestError::UnsupportedEncoding {
        path: path.to_path_buf(),
        encoding,
    })
}

/// Decode with a single encoding, `None` when the bytes are invalid for it.
pub fn decode_with(bytes: &[u8], encoding: TextEncoding) -> Option<String> {
    match encoding {
        TextEncoding::Utf8Sig => {
            let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            std::str::from_utf8(body).ok().map(str::to_owned)
        }
        TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
        TextEncoding::Windows1251 => {
            if bytes.contains(&CP1251_UNDEFINED) {
                return None;
            }
            encoding_rs::WINDOWS_1251
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned())
        }
        TextEncoding::Latin1 => Some(bytes.iter().map(|&byte| char::from(byte)).collect()),
    }
}

/// Decode `bytes` with the first encoding in `order` that accepts them.
pub fn decode(bytes: &[u8], order: &[TextEncoding], path: &Path) -> Result<(String, TextEncoding)> {
    check_bom(bytes, path)?;
    for (attempt, &encoding) in order.iter().enumerate() {
        if let Some(text) = decode_with(bytes, encoding) {
            if attempt > 0 {
                warn!(
                    path = %path.display(),
                    encoding = %encoding,
                    "file is not valid {}, decoded with fallback encoding",
                    order[0]
                );
            } else {
                debug!(path = %path.display(), encoding = %encoding, "file decoded");
            }
            return Ok((text, encoding));
        }
    }
    Err(IngestError::Undecodable {
        path: path.to_path_buf(),
        tried: order
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_sig_strips_bom() {
        let bytes = b"\xEF\xBB\xBFName\n";
        assert_eq!(decode_with(bytes, TextEncoding::Utf8Sig).unwrap(), "Name\n");
        assert_eq!(
            decode_with(bytes, TextEncoding::Utf8).unwrap(),
            "\u{feff}Name\n"
        );
    }

    #[test]
    fn test_cp1251_fallback() {
        // "Привет" in windows-1251
        let bytes = [0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
        let (text, encoding) = decode(
            &bytes,
            &TextEncoding::DEFAULT_ORDER,
            Path::new("x.csv"),
        )
        .unwrap();
        assert_eq!(text, "Привет");
        assert_eq!(encoding, TextEncoding::Windows1251);
    }

    #[test]
    fn test_latin1_accepts_anything() {
        let bytes = [0x98, 0xE9];
        assert_eq!(decode_with(&bytes, TextEncoding::Latin1).unwrap(), "\u{98}é");
    }

    #[test]
    fn test_undefined_cp1251_byte_falls_back_to_latin1() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        assert_eq!(decode_with(&bytes, TextEncoding::Windows1251), None);
        let (text, encoding) = decode(
            &bytes,
            &TextEncoding::DEFAULT_ORDER,
            Path::new("x.csv"),
        )
        .unwrap();
        assert_eq!(encoding, TextEncoding::Latin1);
        assert_eq!(text.chars().count(), bytes.len());
    }

    #[test]
    fn test_utf16_bom_rejected() {
        let result = decode(
            &[0xFF, 0xFE, 0x41, 0x00],
            &TextEncoding::DEFAULT_ORDER,
            Path::new("x.csv"),
        );
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_exhausted_order() {
        let result = decode(&[0xC3, 0x28], &[TextEncoding::Utf8], Path::new("x.csv"));
        assert!(matches!(result, Err(IngestError::Undecodable { .. })));
    }
}
