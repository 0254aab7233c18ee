//! Token patterns and word lists used by the normalization steps.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

const LEGAL_FORMS: &[&str] = &[
    r"\bООО\b",
    r"\bАО\b",
    r"\bЗАО\b",
    r"\bИП\b",
    r"\bПАО\b",
    r"\bГК\b",
    r"\bНКО\b",
    r"\bНПО\b",
    r"\bНПП\b",
    r"\bНПФ\b",
    r"\bОАО\b",
    r"\bLtd\.?\b",
    r"\bLimited\b",
    r"\bInc\.?\b",
    r"\bLLC\b",
    r"\bGmbH\b",
    r"\bCorp\.?\b",
    r"\bCo\.?\b",
    r"\bSARL\b",
    r"\bS\.?A\.?\b",
    r"\bPLC\b",
    r"\bGroup\b",
    r"\bCompany\b",
    r"\bКомпания\b",
    r"\bИндивидуальный предприниматель\b",
    r"\bОбщество с ограниченной ответственностью\b",
];

// Order matters: `8.x` must go before the generic dotted-number rule.
const VERSION_TOKENS: &[&str] = &[
    r"\b(19|20)\d{2}\b",
    r"\b[vV]\.?\d+\.[xX]\b",
    r"\b\d+\.[xX]\b",
    r"\b[vV]\.?\d+(\.\d+)*[a-zA-Z]*\b",
    r"\b\d+\.\d+(\.\d+)*[a-zA-Z]*\b",
    r"\bR\d+\b",
    r"\bSP\d+\b",
    r"\b(x64|x86|64[-\s]?bit|32[-\s]?bit)\b",
    r"\b(Win|Windows|Linux|Mac|MacOS)\s*\d*\b",
];

const STOP_WORDS_RU: &[&str] = &[
    "и", "в", "во", "не", "на", "но", "при", "для", "к", "из", "от", "с", "со", "о", "а", "у",
    "по", "над", "под", "до", "без", "или",
];

const STOP_WORDS_EN: &[&str] = &[
    "the", "a", "an", "and", "or", "of", "for", "in", "on", "at", "to", "from", "with", "by",
    "without", "into", "out", "over", "under", "above", "below",
];

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(&format!("(?i){pattern}")).expect("normalization pattern must compile")
        })
        .collect()
}

pub(crate) static LEGAL_FORM_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_all(LEGAL_FORMS));

pub(crate) static VERSION_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_all(VERSION_TOKENS));

pub(crate) static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{L}\p{M}\p{N}\s]").expect("punctuation pattern must compile")
});

pub(crate) static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    STOP_WORDS_RU
        .iter()
        .chain(STOP_WORDS_EN)
        .copied()
        .collect()
});

/// Replace every match of every pattern, in order, with a single space.
pub(crate) fn erase_all(text: &str, patterns: &[Regex]) -> String {
    patterns.iter().fold(text.to_string(), |acc, pattern| {
        pattern.replace_all(&acc, " ").into_owned()
    })
}
