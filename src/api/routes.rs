use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::{handlers, pages, AppState};

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.assets_dir);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Page
        .route("/", get(pages::index))
        .route("/select", post(pages::select))
        .nest("/api/v1", api_routes())
        .nest_service("/static", assets)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// JSON routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/titles", get(handlers::list_titles))
        .route("/recommendations", get(handlers::get_recommendations))
        .route("/artwork", get(handlers::get_artwork))
        .route(
            "/session",
            get(handlers::get_session).put(handlers::update_session),
        )
}
