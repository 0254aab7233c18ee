use std::collections::HashMap;

use xmatch_normalization::ComparisonKey;

/// One distinct normalized source-2 value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub normalized: String,
    /// Combined value before normalization, as reported in results.
    pub original: String,
    /// Index of the source-2 row the value came from.
    pub row: usize,
}

/// Deduplicated search space built from source-2 comparison keys.
///
/// Empty normalized values are dropped. When several rows normalize to the
/// same string, the first row wins.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
    by_normalized: HashMap<String, usize>,
}

impl CandidatePool {
    pub fn from_keys(keys: &[ComparisonKey]) -> Self {
        let mut pool = Self::default();
        for (row, key) in keys.iter().enumerate() {
            pool.insert(&key.normalized, &key.original, row);
        }
        pool
    }

    /// Pool whose original values equal the normalized ones.
    pub fn from_normalized<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pool = Self::default();
        for (row, value) in values.into_iter().enumerate() {
            pool.insert(value.as_ref(), value.as_ref(), row);
        }
        pool
    }

    fn insert(&mut self, normalized: &str, original: &str, row: usize) {
        if normalized.is_empty() || self.by_normalized.contains_key(normalized) {
            return;
        }
        self.by_normalized
            .insert(normalized.to_string(), self.candidates.len());
        self.candidates.push(Candidate {
            normalized: normalized.to_string(),
            original: original.to_string(),
            row,
        });
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn lookup(&self, normalized: &str) -> Option<&Candidate> {
        self.by_normalized
            .get(normalized)
            .and_then(|&index| self.candidates.get(index))
    }

    /// Original value for a normalized string.
    pub fn original(&self, normalized: &str) -> Option<&str> {
        self.lookup(normalized)
            .map(|candidate| candidate.original.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmatch_normalization::NormalizationOptions;

    #[test]
    fn test_first_occurrence_wins() {
        let options = NormalizationOptions::default();
        let keys = vec![
            ComparisonKey::new("Adobe Reader".into(), &options),
            ComparisonKey::new("".into(), &options),
            ComparisonKey::new("ADOBE  reader".into(), &options),
            ComparisonKey::new("Nginx".into(), &options),
        ];
        let pool = CandidatePool::from_keys(&keys);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.original("adobe reader"), Some("Adobe Reader"));
        assert_eq!(pool.lookup("nginx").map(|c| c.row), Some(3));
        assert!(pool.lookup("").is_none());
    }
}
