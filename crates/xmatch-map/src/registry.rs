//! Declarative table of the built-in matching methods.

use tracing::debug;

use crate::error::{MatchError, Result};
use crate::fuzz::FastScorer;
use crate::method::{Library, ScoringMethod, Strategy};
use crate::similarity::{LinearScorer, Similarity};

/// Algorithm behind a built-in method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Fast(FastScorer),
    Linear(Similarity),
    Exact,
}

/// Static description of a built-in method.
#[derive(Debug, Clone, Copy)]
pub struct MethodDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub library: Library,
    pub kind: MethodKind,
}

impl MethodDescriptor {
    pub fn build(&self) -> ScoringMethod {
        let strategy = match self.kind {
            MethodKind::Fast(scorer) => Strategy::FastSearch(scorer),
            MethodKind::Linear(similarity) => {
                Strategy::LinearScan(LinearScorer::Builtin(similarity))
            }
            MethodKind::Exact => Strategy::Exact,
        };
        ScoringMethod::new(self.id, self.name, self.library, strategy)
    }
}

const fn fast(id: &'static str, name: &'static str, scorer: FastScorer) -> MethodDescriptor {
    MethodDescriptor {
        id,
        name,
        library: Library::RapidFuzz,
        kind: MethodKind::Fast(scorer),
    }
}

const fn linear(
    id: &'static str,
    name: &'static str,
    library: Library,
    similarity: Similarity,
) -> MethodDescriptor {
    MethodDescriptor {
        id,
        name,
        library,
        kind: MethodKind::Linear(similarity),
    }
}

/// Built-in methods in presentation order. The first entry is the default.
pub const BUILTIN_METHODS: &[MethodDescriptor] = &[
    fast("wratio", "WRatio", FastScorer::WRatio),
    fast("ratio", "Ratio", FastScorer::Ratio),
    fast("qratio", "QRatio", FastScorer::QRatio),
    fast("partial_ratio", "Partial Ratio", FastScorer::PartialRatio),
    fast("token_sort", "Token Sort Ratio", FastScorer::TokenSortRatio),
    fast("token_set", "Token Set Ratio", FastScorer::TokenSetRatio),
    fast("token_ratio", "Token Ratio", FastScorer::TokenRatio),
    fast(
        "partial_token_sort",
        "Partial Token Sort Ratio",
        FastScorer::PartialTokenSortRatio,
    ),
    fast(
        "partial_token_set",
        "Partial Token Set Ratio",
        FastScorer::PartialTokenSetRatio,
    ),
    fast(
        "partial_token_ratio",
        "Partial Token Ratio",
        FastScorer::PartialTokenRatio,
    ),
    linear("jaro", "Jaro", Library::RapidFuzz, Similarity::Jaro),
    linear(
        "jaro_winkler",
        "Jaro-Winkler",
        Library::RapidFuzz,
        Similarity::JaroWinkler,
    ),
    linear(
        "levenshtein",
        "Levenshtein",
        Library::RapidFuzz,
        Similarity::Levenshtein,
    ),
    linear("indel", "Indel", Library::RapidFuzz, Similarity::Indel),
    linear(
        "sorensen_dice",
        "Sørensen-Dice",
        Library::Strsim,
        Similarity::SorensenDice,
    ),
    linear(
        "damerau_levenshtein",
        "Damerau-Levenshtein",
        Library::Strsim,
        Similarity::DamerauLevenshtein,
    ),
    linear(
        "bigram_jaccard",
        "Bigram Jaccard",
        Library::Builtin,
        Similarity::BigramJaccard,
    ),
    linear("cosine", "Cosine", Library::Builtin, Similarity::Cosine),
    MethodDescriptor {
        id: "exact",
        name: "Exact Match",
        library: Library::Builtin,
        kind: MethodKind::Exact,
    },
];

/// Immutable, ordered collection of available methods.
#[derive(Debug, Clone)]
pub struct MethodRegistry {
    methods: Vec<ScoringMethod>,
}

impl MethodRegistry {
    /// Every built-in method whose library is compiled in.
    pub fn builtin() -> Self {
        let methods: Vec<ScoringMethod> = BUILTIN_METHODS
            .iter()
            .filter(|descriptor| descriptor.library.is_available())
            .map(MethodDescriptor::build)
            .collect();
        debug!(
            available = methods.len(),
            declared = BUILTIN_METHODS.len(),
            "method registry built"
        );
        Self { methods }
    }

    /// Registry extended with additional methods, appended in order.
    ///
    /// Methods whose id is already registered are ignored.
    #[must_use]
    pub fn with_methods(mut self, extra: impl IntoIterator<Item = ScoringMethod>) -> Self {
        for method in extra {
            if self.get(method.id()).is_none() {
                self.methods.push(method);
            }
        }
        self
    }

    pub fn methods(&self) -> &[ScoringMethod] {
        &self.methods
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Look up a method by id or display name, ignoring ASCII case.
    pub fn get(&self, key: &str) -> Option<&ScoringMethod> {
        self.methods.iter().find(|method| {
            method.id().eq_ignore_ascii_case(key) || method.name().eq_ignore_ascii_case(key)
        })
    }

    /// Methods named by `keys`, in the given order. An empty list selects all.
    pub fn select<S: AsRef<str>>(&self, keys: &[S]) -> Result<Vec<ScoringMethod>> {
        if keys.is_empty() {
            return Ok(self.methods.clone());
        }
        keys.iter()
            .map(|key| {
                self.get(key.as_ref())
                    .cloned()
                    .ok_or_else(|| MatchError::UnknownMethod(key.as_ref().to_string()))
            })
            .collect()
    }

    /// The default method (first registered).
    pub fn default_method(&self) -> Option<&ScoringMethod> {
        self.methods.first()
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = BUILTIN_METHODS.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), BUILTIN_METHODS.len());
    }

    #[test]
    fn test_registry_respects_availability() {
        let registry = MethodRegistry::builtin();
        let expected = BUILTIN_METHODS
            .iter()
            .filter(|d| d.library.is_available())
            .count();
        assert_eq!(registry.len(), expected);
        assert_eq!(
            registry.get("sorensen_dice").is_some(),
            cfg!(feature = "strsim")
        );
    }

    #[test]
    fn test_lookup_by_name_or_id() {
        let registry = MethodRegistry::builtin();
        assert_eq!(registry.get("Jaro-Winkler").map(ScoringMethod::id), Some("jaro_winkler"));
        assert_eq!(registry.get("WRATIO").map(ScoringMethod::name), Some("WRatio"));
        assert_eq!(registry.default_method().map(ScoringMethod::id), Some("wratio"));
        assert!(registry.get("qratio").is_some_and(ScoringMethod::uses_fast_search));
        assert!(registry.get("Cosine").is_some_and(|method| !method.uses_fast_search()));
    }

    #[test]
    fn test_select() {
        let registry = MethodRegistry::builtin();
        let picked = registry.select(&["exact", "ratio"]).unwrap();
        let ids: Vec<&str> = picked.iter().map(ScoringMethod::id).collect();
        assert_eq!(ids, ["exact", "ratio"]);
        assert_eq!(registry.select::<&str>(&[]).unwrap().len(), registry.len());
        assert!(matches!(
            registry.select(&["soundex"]),
            Err(MatchError::UnknownMethod(name)) if name == "soundex"
        ));
    }

    #[test]
    fn test_custom_methods_append() {
        let registry = MethodRegistry::builtin()
            .with_methods([ScoringMethod::custom("always", "Always", |_, _| Ok(1.0))]);
        assert_eq!(registry.methods().last().map(ScoringMethod::id), Some("always"));
    }
}
