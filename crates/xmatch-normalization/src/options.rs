use serde::{Deserialize, Serialize};

/// Switches for the optional normalization steps.
///
/// Case folding and whitespace collapsing always run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationOptions {
    /// Erase organizational forms such as "LLC", "GmbH" or "ООО".
    pub remove_legal: bool,
    /// Erase years, version numbers, service packs and platform tokens.
    pub remove_versions: bool,
    /// Drop short function words in Russian and English.
    pub remove_stopwords: bool,
    /// Replace Cyrillic letters with a Latin approximation.
    pub transliterate: bool,
    /// Replace anything that is not a letter, digit or whitespace with a space.
    pub remove_punctuation: bool,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            remove_legal: false,
            remove_versions: false,
            remove_stopwords: false,
            transliterate: false,
            remove_punctuation: true,
        }
    }
}

impl NormalizationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every optional step enabled.
    pub fn all() -> Self {
        Self {
            remove_legal: true,
            remove_versions: true,
            remove_stopwords: true,
            transliterate: true,
            remove_punctuation: true,
        }
    }

    /// Only the mandatory steps.
    pub fn none() -> Self {
        Self {
            remove_legal: false,
            remove_versions: false,
            remove_stopwords: false,
            transliterate: false,
            remove_punctuation: false,
        }
    }

    #[must_use]
    pub fn with_legal(mut self, enable: bool) -> Self {
        self.remove_legal = enable;
        self
    }

    #[must_use]
    pub fn with_versions(mut self, enable: bool) -> Self {
        self.remove_versions = enable;
        self
    }

    #[must_use]
    pub fn with_stopwords(mut self, enable: bool) -> Self {
        self.remove_stopwords = enable;
        self
    }

    #[must_use]
    pub fn with_transliteration(mut self, enable: bool) -> Self {
        self.transliterate = enable;
        self
    }

    #[must_use]
    pub fn with_punctuation(mut self, enable: bool) -> Self {
        self.remove_punctuation = enable;
        self
    }
}
