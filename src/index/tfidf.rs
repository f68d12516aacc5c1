use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use crate::error::{AppError, AppResult};

use sprs::CsMat;

use super::matrix::csr_from_rows;
use super::stopwords::StopWords;

/// Tokens are runs of two or more word characters
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

/// Fitted TF-IDF features: vocabulary, idf weights and the document matrix
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextFeatures {
    /// Terms in column order
    pub vocabulary: Vec<String>,
    /// Inverse document frequency per column
    pub idf: Vec<f64>,
    /// One L2-normalized row per document
    pub matrix: CsMat<f64>,
}

/// TF-IDF vectorizer
///
/// Lowercases, tokenizes, drops stop words, weights raw counts by smoothed
/// idf `ln((1 + n) / (1 + df)) + 1` and L2-normalizes each row. Columns are
/// ordered alphabetically by term.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    stop_words: Option<StopWords>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self { stop_words: None }
    }

    pub fn with_stop_words_english(mut self) -> Self {
        self.stop_words = Some(StopWords::english());
        self
    }

    /// Lowercased tokens of `document` with stop words removed
    pub fn tokenize(&self, document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        token_regex()
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| {
                self.stop_words
                    .as_ref()
                    .map_or(true, |stop_words| !stop_words.contains(token))
            })
            .map(str::to_string)
            .collect()
    }

    /// Learns the vocabulary and idf weights and returns the weighted matrix.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> AppResult<TextFeatures> {
        if documents.is_empty() {
            return Err(AppError::InvalidInput(
                "cannot fit TF-IDF on an empty corpus".to_string(),
            ));
        }

        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.tokenize(doc.as_ref()))
            .collect();

        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(AppError::InvalidInput(
                "empty vocabulary; overviews contain only stop words".to_string(),
            ));
        }

        let n_docs = documents.len() as f64;
        let vocabulary: Vec<String> = doc_freq.keys().map(|term| term.to_string()).collect();
        let idf: Vec<f64> = doc_freq
            .values()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        let columns: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(col, term)| (term.as_str(), col))
            .collect();

        let rows = tokenized
            .iter()
            .map(|tokens| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for token in tokens {
                    if let Some(&col) = columns.get(token.as_str()) {
                        *counts.entry(col).or_insert(0.0) += 1.0;
                    }
                }
                let mut weighted: Vec<(usize, f64)> = counts
                    .into_iter()
                    .map(|(col, tf)| (col, tf * idf[col]))
                    .collect();
                let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, w) in weighted.iter_mut() {
                        *w /= norm;
                    }
                }
                weighted
            })
            .collect();

        let matrix = csr_from_rows(vocabulary.len(), rows);

        Ok(TextFeatures {
            vocabulary,
            idf,
            matrix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_short_tokens_and_stop_words() {
        let vectorizer = TfidfVectorizer::new().with_stop_words_english();
        let tokens = vectorizer.tokenize("A thief, who steals the DREAMS of 2 people");
        assert_eq!(tokens, vec!["thief", "steals", "dreams", "people"]);
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let features = TfidfVectorizer::new()
            .with_stop_words_english()
            .fit_transform(&["zebra crossing", "apple orchard"])
            .unwrap();
        assert_eq!(
            features.vocabulary,
            vec!["apple", "crossing", "orchard", "zebra"]
        );
        assert_eq!(features.matrix.shape(), (2, 4));
    }

    #[test]
    fn test_smoothed_idf() {
        let features = TfidfVectorizer::new()
            .fit_transform(&["space war", "space opera", "space"])
            .unwrap();
        let space = features.vocabulary.iter().position(|t| t == "space").unwrap();
        let war = features.vocabulary.iter().position(|t| t == "war").unwrap();

        assert!((features.idf[space] - 1.0).abs() < 1e-12);
        assert!((features.idf[war] - ((4.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let features = TfidfVectorizer::new()
            .with_stop_words_english()
            .fit_transform(&["robots fight robots", "a quiet drama", "the"])
            .unwrap();
        let norms: Vec<f64> = features
            .matrix
            .outer_iterator()
            .map(|row| row.l2_norm())
            .collect();
        assert!((norms[0] - 1.0).abs() < 1e-12);
        assert!((norms[1] - 1.0).abs() < 1e-12);
        assert_eq!(norms[2], 0.0);
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let result = TfidfVectorizer::new()
            .with_stop_words_english()
            .fit_transform(&["the and of", "it is"]);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
