use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use movie_recommender::api::{create_router, AppState};
use movie_recommender::index::IndexBuilder;
use movie_recommender::services::{ArtworkService, Recommender, ScoringWeights};

const PLACEHOLDER: &str = "/static/notfound.svg";

const CATALOG: &str = "\
title,overview,popularity,vote_average
Heat,Detective hunts a crew of professional thieves in the city,60,8.2
Alien,Crew of a space freighter meets a deadly creature,80,8.4
Aliens,Marines return to the planet to fight the creature,70,8.3
Up,Old man flies his house with balloons to South America,90,8.3
Ghost,,50,7.0
Tom & Jerry,Cat chases mouse through the house,40,6.1
";

fn create_test_server() -> TestServer {
    let (artifacts, _) = IndexBuilder::new()
        .build_from_reader(CATALOG.as_bytes())
        .unwrap();
    let recommender = Arc::new(Recommender::new(artifacts, ScoringWeights::default()));
    let artwork = Arc::new(ArtworkService::new(
        None,
        "https://image.tmdb.org/t/p/w500".to_string(),
        PLACEHOLDER.to_string(),
    ));
    let state = AppState::new(recommender, artwork, 3, "assets");
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_titles_are_sorted() {
    let server = create_test_server();
    let titles: Vec<String> = server.get("/api/v1/titles").await.json();
    assert_eq!(titles, vec!["Alien", "Aliens", "Heat", "Tom & Jerry", "Up"]);
}

#[tokio::test]
async fn test_recommendations() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Alien")
        .add_query_param("n", 10)
        .await;
    response.assert_status_ok();

    let results: Vec<Value> = response.json();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0]["title"], "Aliens");
    assert!(results.iter().all(|r| r["title"] != "Alien"));
}

#[tokio::test]
async fn test_recommendations_default_count() {
    let server = create_test_server();
    let results: Vec<Value> = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Alien")
        .await
        .json();
    assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn test_recommendations_unknown_title_is_empty() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Ghost")
        .await;
    response.assert_status_ok();
    let results: Vec<Value> = response.json();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_recommendations_non_positive_count_is_empty() {
    let server = create_test_server();
    let results: Vec<Value> = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Alien")
        .add_query_param("n", -2)
        .await
        .json();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_artwork_without_api_key_is_placeholder() {
    let server = create_test_server();
    let artwork: Value = server
        .get("/api/v1/artwork")
        .add_query_param("title", "Up")
        .await
        .json();
    assert_eq!(artwork["poster_url"], PLACEHOLDER);
    assert_eq!(artwork["backdrop_url"], Value::Null);
}

#[tokio::test]
async fn test_session_defaults_to_first_row() {
    let server = create_test_server();
    let session: Value = server.get("/api/v1/session").await.json();
    assert_eq!(session["selected_title"], "Heat");
}

#[tokio::test]
async fn test_update_session() {
    let server = create_test_server();

    let response = server
        .put("/api/v1/session")
        .json(&json!({ "title": "Up" }))
        .await;
    response.assert_status_ok();

    let session: Value = server.get("/api/v1/session").await.json();
    assert_eq!(session["selected_title"], "Up");
}

#[tokio::test]
async fn test_update_session_unknown_title() {
    let server = create_test_server();

    let response = server
        .put("/api/v1/session")
        .json(&json!({ "title": "Ghost" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let session: Value = server.get("/api/v1/session").await.json();
    assert_eq!(session["selected_title"], "Heat");
}

#[tokio::test]
async fn test_page_renders_selected_title_and_cards() {
    let server = create_test_server();
    let response = server.get("/").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("<h2>Heat</h2>"));
    assert!(html.contains("<option value=\"Tom &amp; Jerry\">Tom &amp; Jerry</option>"));
    assert_eq!(html.matches("<div class=\"card\">").count(), 3);
    assert!(html.contains(PLACEHOLDER));
    assert!(!html.contains("class=\"backdrop\""));
}

#[tokio::test]
async fn test_page_query_selects_title() {
    let server = create_test_server();
    let html = server.get("/").add_query_param("title", "Aliens").await.text();
    assert!(html.contains("<h2>Aliens</h2>"));
    assert!(html.contains("<option value=\"Aliens\" selected>Aliens</option>"));
}

#[tokio::test]
async fn test_select_form_updates_session_and_redirects() {
    let server = create_test_server();

    let response = server
        .post("/select")
        .form(&[("title", "Alien")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);

    let html = server.get("/").await.text();
    assert!(html.contains("<h2>Alien</h2>"));
}

#[tokio::test]
async fn test_request_id_header_is_set() {
    let server = create_test_server();
    let response = server.get("/health").await;
    let request_id = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
}
