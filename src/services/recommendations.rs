use serde::{Deserialize, Serialize};

use crate::{
    index::{matrix::cosine_similarities, IndexArtifacts},
    models::Catalog,
};

/// Weights of the hybrid score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub similarity: f64,
    pub popularity: f64,
    pub vote: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            similarity: 0.6,
            popularity: 0.2,
            vote: 0.2,
        }
    }
}

impl ScoringWeights {
    pub fn score(&self, similarity: f64, norm_popularity: f64, norm_vote: f64) -> f64 {
        self.similarity * similarity + self.popularity * norm_popularity + self.vote * norm_vote
    }
}

/// A recommended title with its hybrid score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredTitle {
    pub title: String,
    pub score: f64,
}

/// Content-plus-popularity recommender over the loaded artifacts
///
/// Constructed once at startup and shared read-only.
pub struct Recommender {
    artifacts: IndexArtifacts,
    weights: ScoringWeights,
}

impl Recommender {
    pub fn new(artifacts: IndexArtifacts, weights: ScoringWeights) -> Self {
        Self { artifacts, weights }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.artifacts.catalog
    }

    pub fn contains(&self, title: &str) -> bool {
        self.artifacts.title_index.contains(title)
    }

    /// Title of the first catalog row
    pub fn default_title(&self) -> Option<&str> {
        self.artifacts.catalog.titles().next()
    }

    /// All catalog titles in alphabetical order
    pub fn sorted_titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = self.artifacts.catalog.titles().map(str::to_string).collect();
        titles.sort();
        titles
    }

    /// Up to `n` titles most similar to `title`, best first.
    ///
    /// Unknown titles yield an empty list.
    pub fn recommend(&self, title: &str, n: usize) -> Vec<String> {
        self.recommend_scored(title, n)
            .into_iter()
            .map(|scored| scored.title)
            .collect()
    }

    /// Like [`Recommender::recommend`] but keeps the hybrid scores
    pub fn recommend_scored(&self, title: &str, n: usize) -> Vec<ScoredTitle> {
        if n == 0 {
            return Vec::new();
        }
        let Some(query) = self.artifacts.title_index.position(title) else {
            tracing::debug!(title = %title, "Recommendation requested for unknown title");
            return Vec::new();
        };

        let rows = self.artifacts.catalog.rows();
        let similarities = cosine_similarities(&self.artifacts.features.matrix, query);

        let mut ranked: Vec<(usize, f64)> = rows
            .iter()
            .zip(similarities)
            .map(|(row, similarity)| {
                self.weights
                    .score(similarity, row.norm_popularity, row.norm_vote)
            })
            .enumerate()
            .collect();
        // Stable: equal scores keep catalog order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranked
            .into_iter()
            .filter(|(position, _)| *position != query)
            .take(n)
            .map(|(position, score)| ScoredTitle {
                title: rows[position].title.clone(),
                score,
            })
            .collect()
    }
}
