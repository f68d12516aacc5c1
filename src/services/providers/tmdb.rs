/// TMDB (The Movie Database) provider
///
/// Uses `/search/movie` keyed by an API key; the first result carries the
/// `poster_path` and `backdrop_path` used for artwork.
use reqwest::{Client as HttpClient, StatusCode};
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::{TmdbMovie, TmdbSearchResponse},
    services::providers::ArtworkProvider,
};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search/movie", self.api_url)
    }
}

#[async_trait::async_trait]
impl ArtworkProvider for TmdbProvider {
    async fn search_movie(&self, title: &str) -> AppResult<Option<TmdbMovie>> {
        let response = self
            .http_client
            .get(self.search_url())
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let search: TmdbSearchResponse = response.json().await?;

        tracing::debug!(
            title = %title,
            results = search.results.len(),
            provider = self.name(),
            "Movie search completed"
        );

        Ok(search.results.into_iter().next())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
