//! Raw similarity functions used by the linear scan strategy.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use rapidfuzz::distance::{indel, jaro, jaro_winkler, levenshtein};
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Built-in pairwise similarity functions. All return a fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Similarity {
    Jaro,
    JaroWinkler,
    Levenshtein,
    Indel,
    SorensenDice,
    DamerauLevenshtein,
    BigramJaccard,
    Cosine,
}

impl Similarity {
    pub fn compute(self, a: &str, b: &str) -> Result<f64, ScoringError> {
        match self {
            Self::Jaro => Ok(jaro::similarity(a.chars(), b.chars())),
            Self::JaroWinkler => Ok(jaro_winkler::similarity(a.chars(), b.chars())),
            Self::Levenshtein => Ok(levenshtein::normalized_similarity(a.chars(), b.chars())),
            Self::Indel => Ok(indel::normalized_similarity(a.chars(), b.chars())),
            Self::SorensenDice => sorensen_dice(a, b),
            Self::DamerauLevenshtein => damerau_levenshtein(a, b),
            Self::BigramJaccard => Ok(bigram_jaccard(a, b)),
            Self::Cosine => Ok(char_cosine(a, b)),
        }
    }
}

#[cfg(feature = "strsim")]
fn sorensen_dice(a: &str, b: &str) -> Result<f64, ScoringError> {
    Ok(strsim::sorensen_dice(a, b))
}

#[cfg(not(feature = "strsim"))]
fn sorensen_dice(_a: &str, _b: &str) -> Result<f64, ScoringError> {
    Err(ScoringError::Unavailable {
        method: "sorensen_dice",
    })
}

#[cfg(feature = "strsim")]
fn damerau_levenshtein(a: &str, b: &str) -> Result<f64, ScoringError> {
    Ok(strsim::normalized_damerau_levenshtein(a, b))
}

#[cfg(not(feature = "strsim"))]
fn damerau_levenshtein(_a: &str, _b: &str) -> Result<f64, ScoringError> {
    Err(ScoringError::Unavailable {
        method: "damerau_levenshtein",
    })
}

fn bigrams(text: &str) -> HashSet<(char, char)> {
    let chars: Vec<char> = text.chars().collect();
    match chars.as_slice() {
        [] => HashSet::new(),
        [only] => HashSet::from([(*only, *only)]),
        _ => chars.windows(2).map(|pair| (pair[0], pair[1])).collect(),
    }
}

/// Jaccard index of the character bigram sets. Single characters count as one bigram.
pub fn bigram_jaccard(a: &str, b: &str) -> f64 {
    let left = bigrams(a);
    let right = bigrams(b);
    if left.is_empty() && right.is_empty() {
        return 1.0;
    }
    let shared = left.intersection(&right).count();
    let union = left.len() + right.len() - shared;
    shared as f64 / union as f64
}

fn char_counts(text: &str) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

/// Cosine similarity of the character multisets: shared characters over the
/// geometric mean of the two lengths. Two empty strings are identical.
pub fn char_cosine(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 && len_b == 0 {
        return 1.0;
    }
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }
    let left = char_counts(a);
    let right = char_counts(b);
    let shared: usize = left
        .iter()
        .map(|(c, count)| right.get(c).map_or(0, |other| (*count).min(*other)))
        .sum();
    shared as f64 / ((len_a * len_b) as f64).sqrt()
}

/// Signature of a user-supplied similarity function.
///
/// May return a fraction in `[0, 1]` or a percentage in `[0, 100]`.
pub type ScoreFn = dyn Fn(&str, &str) -> Result<f64, ScoringError> + Send + Sync;

/// Shared handle to a user-supplied similarity function.
#[derive(Clone)]
pub struct CustomScorer(Arc<ScoreFn>);

impl CustomScorer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, &str) -> Result<f64, ScoringError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, a: &str, b: &str) -> Result<f64, ScoringError> {
        (self.0)(a, b)
    }
}

impl fmt::Debug for CustomScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomScorer(..)")
    }
}

/// Similarity function driven by the linear scan.
#[derive(Debug, Clone)]
pub enum LinearScorer {
    Builtin(Similarity),
    Custom(CustomScorer),
}

impl LinearScorer {
    /// Raw similarity as returned by the underlying function.
    pub fn raw(&self, a: &str, b: &str) -> Result<f64, ScoringError> {
        match self {
            Self::Builtin(similarity) => similarity.compute(a, b),
            Self::Custom(scorer) => scorer.call(a, b),
        }
    }

    /// Similarity on the percentage scale.
    pub fn percentage(&self, a: &str, b: &str) -> Result<f64, ScoringError> {
        self.raw(a, b).and_then(to_percentage)
    }
}

/// Bring a raw similarity onto `[0, 100]`.
///
/// Values in `[0, 1]` are fractions and get scaled; values in `(1, 100]`
/// are already percentages.
pub fn to_percentage(raw: f64) -> Result<f64, ScoringError> {
    if !raw.is_finite() {
        Err(ScoringError::NonFinite { value: raw })
    } else if (0.0..=1.0).contains(&raw) {
        Ok(raw * 100.0)
    } else if raw > 1.0 && raw <= 100.0 {
        Ok(raw)
    } else {
        Err(ScoringError::OutOfRange { value: raw })
    }
}
