use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::services::{ArtworkService, Recommender};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub artwork: Arc<ArtworkService>,
    pub session: Arc<RwLock<Session>>,
    /// Number of recommendation cards rendered on the page
    pub recommendation_count: usize,
    /// Directory served under `/static`
    pub assets_dir: PathBuf,
}

/// The single user's session
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub selected_title: Option<String>,
}

impl AppState {
    /// Creates the state with the first catalog title selected
    pub fn new(
        recommender: Arc<Recommender>,
        artwork: Arc<ArtworkService>,
        recommendation_count: usize,
        assets_dir: impl Into<PathBuf>,
    ) -> Self {
        let session = Session {
            selected_title: recommender.default_title().map(str::to_string),
        };

        Self {
            recommender,
            artwork,
            session: Arc::new(RwLock::new(session)),
            recommendation_count,
            assets_dir: assets_dir.into(),
        }
    }

    pub async fn selected_title(&self) -> Option<String> {
        self.session.read().await.selected_title.clone()
    }

    /// Selects `title` if it is in the catalog; returns whether it changed
    pub async fn select_title(&self, title: &str) -> bool {
        if !self.recommender.contains(title) {
            tracing::debug!(title = %title, "Ignoring selection of unknown title");
            return false;
        }
        let mut session = self.session.write().await;
        session.selected_title = Some(title.to_string());
        tracing::info!(title = %title, "Selected title");
        true
    }
}
