/// Movie artwork provider abstraction
///
/// Providers look a title up in an external metadata service and return the
/// best match's image paths. Turning paths into URLs, placeholder fallback and
/// memoization live in [`ArtworkService`](crate::services::artwork::ArtworkService).
use crate::{error::AppResult, models::TmdbMovie};

pub mod tmdb;

pub use tmdb::TmdbProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ArtworkProvider: Send + Sync {
    /// Search for `title` and return the first match, if any
    async fn search_movie(&self, title: &str) -> AppResult<Option<TmdbMovie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
