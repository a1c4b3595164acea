//! Unit vector representation for steps
//!
//! Builds sparse TF-IDF vectors over a set of distinct step strings. The
//! vocabulary and document frequencies come from that set alone, so vectors
//! are only comparable within one invocation.

use crate::nlp::tokenizer::WordTokenizer;
use rustc_hash::FxHashMap;

/// A sparse unit vector representation of a step
#[derive(Debug, Clone, Default)]
pub struct UnitVector {
    /// Non-zero dimensions: term -> weight
    pub dimensions: FxHashMap<String, f64>,
    /// L2 norm of the vector before normalization
    pub norm: f64,
}

impl UnitVector {
    /// Create from a map of dimensions
    pub fn from_dimensions(mut dimensions: FxHashMap<String, f64>) -> Self {
        let norm = Self::compute_norm(&dimensions);
        if norm > 0.0 {
            for value in dimensions.values_mut() {
                *value /= norm;
            }
        }
        Self { dimensions, norm }
    }

    /// Compute L2 norm
    fn compute_norm(dimensions: &FxHashMap<String, f64>) -> f64 {
        dimensions.values().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Compute cosine similarity with another vector
    pub fn cosine_similarity(&self, other: &UnitVector) -> f64 {
        // Since vectors are normalized, cosine similarity is just the dot product
        let (small, large) = if self.dimensions.len() <= other.dimensions.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .dimensions
            .iter()
            .filter_map(|(key, value)| large.dimensions.get(key).map(|o| value * o))
            .sum()
    }
}

/// TF-IDF vectorizer fitted on one set of steps
///
/// Raw term counts weighted by smoothed inverse document frequency
/// `ln((1 + n) / (1 + df)) + 1`, then L2-normalized.
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    tokenizer: WordTokenizer,
}

impl TfIdfVectorizer {
    /// Create a vectorizer with the default tokenizer
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom tokenizer
    pub fn with_tokenizer(tokenizer: WordTokenizer) -> Self {
        Self { tokenizer }
    }

    /// Fit on `documents` and return one vector per document, in order
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Vec<UnitVector> {
        let term_counts: Vec<FxHashMap<String, f64>> = documents
            .iter()
            .map(|doc| {
                let mut counts: FxHashMap<String, f64> = FxHashMap::default();
                for term in self.tokenizer.tokenize(doc.as_ref()) {
                    *counts.entry(term).or_insert(0.0) += 1.0;
                }
                counts
            })
            .collect();

        let mut document_frequency: FxHashMap<&str, usize> = FxHashMap::default();
        for counts in &term_counts {
            for term in counts.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: FxHashMap<&str, f64> = document_frequency
            .into_iter()
            .map(|(term, df)| (term, ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0))
            .collect();

        term_counts
            .iter()
            .map(|counts| {
                let weighted = counts
                    .iter()
                    .map(|(term, tf)| {
                        let weight = tf * idf.get(term.as_str()).copied().unwrap_or(1.0);
                        (term.clone(), weight)
                    })
                    .collect();
                UnitVector::from_dimensions(weighted)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical() {
        let mut dims = FxHashMap::default();
        dims.insert("a".to_string(), 1.0);
        dims.insert("b".to_string(), 2.0);

        let v1 = UnitVector::from_dimensions(dims.clone());
        let v2 = UnitVector::from_dimensions(dims);

        let sim = v1.cosine_similarity(&v2);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let mut dims1 = FxHashMap::default();
        dims1.insert("a".to_string(), 1.0);

        let mut dims2 = FxHashMap::default();
        dims2.insert("b".to_string(), 1.0);

        let v1 = UnitVector::from_dimensions(dims1);
        let v2 = UnitVector::from_dimensions(dims2);

        assert!(v1.cosine_similarity(&v2).abs() < 1e-6);
    }

    #[test]
    fn test_empty_vector() {
        let v = UnitVector::from_dimensions(FxHashMap::default());
        assert!(v.dimensions.is_empty());
        assert!((v.norm - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_unit_normalization() {
        let mut dims = FxHashMap::default();
        dims.insert("a".to_string(), 3.0);
        dims.insert("b".to_string(), 4.0);

        let v = UnitVector::from_dimensions(dims);

        assert!((v.norm - 5.0).abs() < 1e-9);
        let actual_norm: f64 = v.dimensions.values().map(|x| x * x).sum::<f64>().sqrt();
        assert!((actual_norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_tfidf_weights() {
        let vectors = TfIdfVectorizer::new().fit_transform(&["turn left", "turn right"]);

        // "turn" appears in both documents: idf = ln(3/3) + 1 = 1
        // "left" appears in one: idf = ln(3/2) + 1
        let rare = (1.5f64).ln() + 1.0;
        let norm = (1.0 + rare * rare).sqrt();
        assert!((vectors[0].dimensions["turn"] - 1.0 / norm).abs() < 1e-9);
        assert!((vectors[0].dimensions["left"] - rare / norm).abs() < 1e-9);

        let sim = vectors[0].cosine_similarity(&vectors[1]);
        assert!((sim - 1.0 / (norm * norm)).abs() < 1e-9);
    }

    #[test]
    fn test_tfidf_term_frequency_counts_repeats() {
        let vectors = TfIdfVectorizer::new().fit_transform(&["keep keep right", "exit"]);
        let keep = vectors[0].dimensions["keep"];
        let right = vectors[0].dimensions["right"];
        assert!((keep - 2.0 * right).abs() < 1e-9);
    }

    #[test]
    fn test_tfidf_document_without_terms() {
        let vectors = TfIdfVectorizer::new().fit_transform(&["a", "turn left"]);
        assert!(vectors[0].dimensions.is_empty());
        assert!(vectors[0].cosine_similarity(&vectors[1]).abs() < 1e-12);
    }
}
