use std::sync::Arc;

use crate::{
    cache::{Cache, CacheKey},
    cached,
    models::{Artwork, TmdbMovie},
    services::providers::ArtworkProvider,
};

/// Best-effort artwork lookup with placeholder fallback
///
/// Lookups never fail: a missing provider (no API key), a provider error or
/// a result without a poster all yield the placeholder poster. Results are
/// memoized per title for the process lifetime.
#[derive(Clone)]
pub struct ArtworkService {
    provider: Option<Arc<dyn ArtworkProvider>>,
    image_base_url: String,
    placeholder_url: String,
    cache: Cache<Artwork>,
}

impl ArtworkService {
    pub fn new(
        provider: Option<Arc<dyn ArtworkProvider>>,
        image_base_url: String,
        placeholder_url: String,
    ) -> Self {
        if provider.is_none() {
            tracing::warn!("No artwork provider configured; serving placeholder images");
        }

        Self {
            provider,
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
            placeholder_url,
            cache: Cache::new(),
        }
    }

    /// Poster and backdrop for `title`
    pub async fn lookup(&self, title: &str) -> Artwork {
        let Some(provider) = self.provider.as_ref() else {
            return Artwork::placeholder(&self.placeholder_url);
        };

        cached!(
            self.cache,
            CacheKey::Artwork(title.to_string()),
            async move {
                match provider.search_movie(title).await {
                    Ok(Some(movie)) => self.artwork_from(movie),
                    Ok(None) => {
                        tracing::info!(title = %title, provider = provider.name(), "No artwork match");
                        Artwork::placeholder(&self.placeholder_url)
                    }
                    Err(e) => {
                        tracing::warn!(
                            title = %title,
                            provider = provider.name(),
                            error = %e,
                            "Artwork lookup failed"
                        );
                        Artwork::placeholder(&self.placeholder_url)
                    }
                }
            }
        )
    }

    fn artwork_from(&self, movie: TmdbMovie) -> Artwork {
        let image_url = |path: Option<String>| {
            path.filter(|p| !p.is_empty())
                .map(|p| format!("{}/{}", self.image_base_url, p.trim_start_matches('/')))
        };

        Artwork {
            poster_url: image_url(movie.poster_path)
                .unwrap_or_else(|| self.placeholder_url.clone()),
            backdrop_url: image_url(movie.backdrop_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::providers::MockArtworkProvider;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";
    const PLACEHOLDER: &str = "/static/notfound.svg";

    fn service(provider: MockArtworkProvider) -> ArtworkService {
        ArtworkService::new(
            Some(Arc::new(provider)),
            IMAGE_BASE.to_string(),
            PLACEHOLDER.to_string(),
        )
    }

    fn movie(poster: Option<&str>, backdrop: Option<&str>) -> TmdbMovie {
        TmdbMovie {
            poster_path: poster.map(str::to_string),
            backdrop_path: backdrop.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_without_provider_returns_placeholder() {
        let service = ArtworkService::new(None, IMAGE_BASE.to_string(), PLACEHOLDER.to_string());
        let artwork = service.lookup("Inception").await;
        assert_eq!(artwork, Artwork::placeholder(PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_builds_absolute_urls() {
        let mut provider = MockArtworkProvider::new();
        provider
            .expect_search_movie()
            .returning(|_| Ok(Some(movie(Some("/poster.jpg"), Some("/backdrop.jpg")))));
        provider.expect_name().return_const("mock");

        let artwork = service(provider).lookup("Inception").await;
        assert_eq!(artwork.poster_url, format!("{}/poster.jpg", IMAGE_BASE));
        assert_eq!(
            artwork.backdrop_url,
            Some(format!("{}/backdrop.jpg", IMAGE_BASE))
        );
    }

    #[tokio::test]
    async fn test_missing_poster_uses_placeholder_but_keeps_backdrop() {
        let mut provider = MockArtworkProvider::new();
        provider
            .expect_search_movie()
            .returning(|_| Ok(Some(movie(None, Some("/backdrop.jpg")))));
        provider.expect_name().return_const("mock");

        let artwork = service(provider).lookup("Heat").await;
        assert_eq!(artwork.poster_url, PLACEHOLDER);
        assert!(artwork.backdrop_url.is_some());
    }

    #[tokio::test]
    async fn test_missing_backdrop_has_no_placeholder() {
        let mut provider = MockArtworkProvider::new();
        provider
            .expect_search_movie()
            .returning(|_| Ok(Some(movie(Some("/poster.jpg"), None))));
        provider.expect_name().return_const("mock");

        let artwork = service(provider).lookup("Heat").await;
        assert_eq!(artwork.backdrop_url, None);
    }

    #[tokio::test]
    async fn test_provider_error_falls_back_to_placeholder() {
        let mut provider = MockArtworkProvider::new();
        provider
            .expect_search_movie()
            .returning(|_| Err(AppError::ExternalApi("status 401".to_string())));
        provider.expect_name().return_const("mock");

        let artwork = service(provider).lookup("Up").await;
        assert_eq!(artwork, Artwork::placeholder(PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_no_results_falls_back_to_placeholder() {
        let mut provider = MockArtworkProvider::new();
        provider.expect_search_movie().returning(|_| Ok(None));
        provider.expect_name().return_const("mock");

        let artwork = service(provider).lookup("Nothing").await;
        assert_eq!(artwork, Artwork::placeholder(PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_lookups_are_memoized_per_title() {
        let mut provider = MockArtworkProvider::new();
        provider
            .expect_search_movie()
            .times(2)
            .returning(|_| Ok(Some(movie(Some("/poster.jpg"), None))));
        provider.expect_name().return_const("mock");

        let service = service(provider);
        service.lookup("Alien").await;
        service.lookup("Alien").await;
        service.lookup("Aliens").await;
    }
}
