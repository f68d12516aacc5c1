use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;

use super::views::{render_page, Card, PageView};
use super::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectForm {
    pub title: String,
}

/// Renders the recommender page, optionally selecting `?title=` first
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> Html<String> {
    if let Some(title) = params.title.as_deref() {
        state.select_title(title).await;
    }

    let selected = state.selected_title().await;
    let mut view = PageView {
        titles: state.recommender.sorted_titles(),
        selected: selected.clone(),
        ..Default::default()
    };

    if let Some(selected) = selected {
        view.backdrop_url = state.artwork.lookup(&selected).await.backdrop_url;

        for title in state
            .recommender
            .recommend(&selected, state.recommendation_count)
        {
            let poster_url = state.artwork.lookup(&title).await.poster_url;
            view.cards.push(Card { title, poster_url });
        }
    }

    Html(render_page(&view))
}

/// Selects a recommended title and returns to the page
pub async fn select(State(state): State<AppState>, Form(form): Form<SelectForm>) -> Redirect {
    state.select_title(&form.title).await;
    Redirect::to("/")
}
