use serde::Deserialize;

use crate::services::recommendations::ScoringWeights;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key; artwork lookups are disabled when unset or empty
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with `poster_path` / `backdrop_path` to form image URLs
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Per-request timeout for TMDB calls, in seconds
    #[serde(default = "default_tmdb_timeout_secs")]
    pub tmdb_timeout_secs: u64,

    /// Directory holding the artifacts written by `build-index`
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: String,

    /// Directory served under `/static`
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,

    /// URL of the image shown when no poster is available
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,

    /// Number of recommendations rendered on the page
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    #[serde(default = "default_weight_similarity")]
    pub weight_similarity: f64,

    #[serde(default = "default_weight_popularity")]
    pub weight_popularity: f64,

    #[serde(default = "default_weight_vote")]
    pub weight_vote: f64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_tmdb_timeout_secs() -> u64 {
    10
}

fn default_artifacts_dir() -> String {
    "artifacts".to_string()
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_placeholder_image() -> String {
    "/static/notfound.svg".to_string()
}

fn default_recommendation_count() -> usize {
    10
}

fn default_weight_similarity() -> f64 {
    ScoringWeights::default().similarity
}

fn default_weight_popularity() -> f64 {
    ScoringWeights::default().popularity
}

fn default_weight_vote() -> f64 {
    ScoringWeights::default().vote
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// The TMDB key, treating an empty value as absent
    pub fn tmdb_api_key(&self) -> Option<&str> {
        self.tmdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights {
            similarity: self.weight_similarity,
            popularity: self.weight_popularity,
            vote: self.weight_vote,
        }
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
