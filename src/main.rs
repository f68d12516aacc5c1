use std::sync::Arc;
use std::time::Duration;

use movie_recommender::{
    api::{create_router, AppState},
    config::Config,
    index::IndexArtifacts,
    services::{providers::{ArtworkProvider, TmdbProvider}, ArtworkService, Recommender},
    telemetry,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = Config::from_env()?;

    // Artifacts are loaded once and shared read-only
    let artifacts = IndexArtifacts::load(&config.artifacts_dir)?;
    let recommender = Arc::new(Recommender::new(artifacts, config.scoring_weights()));

    let provider: Option<Arc<dyn ArtworkProvider>> = match config.tmdb_api_key() {
        Some(api_key) => Some(Arc::new(TmdbProvider::new(
            api_key.to_string(),
            config.tmdb_api_url.clone(),
            Duration::from_secs(config.tmdb_timeout_secs),
        )?)),
        None => None,
    };
    let artwork = Arc::new(ArtworkService::new(
        provider,
        config.tmdb_image_url.clone(),
        config.placeholder_image.clone(),
    ));

    let state = AppState::new(
        recommender,
        artwork,
        config.recommendation_count,
        &config.assets_dir,
    );
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
