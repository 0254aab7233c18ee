//! The fixed-order normalization pipeline.

use tracing::debug;

use crate::options::NormalizationOptions;
use crate::patterns::{LEGAL_FORM_PATTERNS, PUNCTUATION, STOP_WORDS, VERSION_PATTERNS, erase_all};
use crate::transliterate::{needs_transliteration, transliterate};

/// Upper bound on pipeline passes. Each pass after the first either leaves
/// the text unchanged or shortens it, so the limit is never reached in practice.
const MAX_PASSES: usize = 16;

/// Convert `raw` into its canonical comparison form.
///
/// Steps, in order: trim, legal forms, version tokens, lower-case,
/// punctuation, stop words, transliteration, whitespace collapse. Optional
/// steps run only when their flag is set. The pipeline is repeated until
/// the output is stable, so `normalize(normalize(s)) == normalize(s)`.
///
/// Blank input yields an empty string. An empty result is valid and means
/// "no comparable value".
pub fn normalize(raw: &str, options: &NormalizationOptions) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    let mut current = normalize_once(raw, options);
    for _ in 1..MAX_PASSES {
        let next = normalize_once(&current, options);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn normalize_once(raw: &str, options: &NormalizationOptions) -> String {
    let mut text = raw.trim().to_string();

    if options.remove_legal {
        text = erase_all(&text, &LEGAL_FORM_PATTERNS);
    }
    if options.remove_versions {
        text = erase_all(&text, &VERSION_PATTERNS);
    }

    text = text.to_lowercase();

    if options.remove_punctuation {
        text = PUNCTUATION.replace_all(&text, " ").into_owned();
    }
    if options.remove_stopwords {
        text = text
            .split_whitespace()
            .filter(|word| !STOP_WORDS.contains(word))
            .collect::<Vec<_>>()
            .join(" ");
    }
    if options.transliterate && needs_transliteration(&text) {
        match transliterate(&text) {
            Ok(latin) => text = latin,
            Err(error) => debug!(%error, "transliteration skipped"),
        }
    }

    collapse_whitespace(&text)
}

/// Collapse runs of whitespace to single spaces and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
