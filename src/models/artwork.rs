use serde::{Deserialize, Serialize};

/// Poster and backdrop URLs for a title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artwork {
    /// Absolute poster URL, or the placeholder image
    pub poster_url: String,
    /// Absolute backdrop URL; never substituted with a placeholder
    pub backdrop_url: Option<String>,
}

impl Artwork {
    pub fn placeholder(placeholder_url: &str) -> Self {
        Self {
            poster_url: placeholder_url.to_string(),
            backdrop_url: None,
        }
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from TMDB `GET /search/movie`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}
