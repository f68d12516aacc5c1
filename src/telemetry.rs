use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global tracing subscriber
///
/// Honors `RUST_LOG`, defaulting to `info` for this crate and `warn` elsewhere.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,movie_recommender=info,build_index=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
