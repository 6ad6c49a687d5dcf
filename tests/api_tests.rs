use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use shrec_api::{
    api::{create_router, AppState},
    db::InMemoryRatingStore,
    models::Book,
    services::{NoSignalPolicy, RecommendationEngine},
};

fn books() -> Vec<Book> {
    vec![
        Book::new(1, "A Study in Scarlet"),
        Book::new(2, "The Sign of the Four"),
        Book::new(3, "The Hound of the Baskervilles"),
    ]
}

fn create_test_server(rows: Vec<Vec<i32>>, policy: NoSignalPolicy) -> TestServer {
    let store = Arc::new(InMemoryRatingStore::with_ratings(books(), rows));
    let state = AppState::new(store, RecommendationEngine::new(policy, 5));
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(vec![], NoSignalPolicy::Exclude);
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn test_get_books() {
    let server = create_test_server(vec![], NoSignalPolicy::Exclude);

    let response = server.get("/api/v1/books").await;
    response.assert_status_ok();

    let books: Vec<Value> = response.json();
    assert_eq!(books.len(), 3);
    assert_eq!(books[2]["book_id"], 3);
    assert_eq!(books[2]["title"], "The Hound of the Baskervilles");
}

#[tokio::test]
async fn test_recommendation_scenario() {
    let server = create_test_server(
        vec![vec![5, 0, 3], vec![0, 0, 4], vec![5, 5, 0]],
        NoSignalPolicy::Exclude,
    );

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "ratings": [0, 5, 0] }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["book_id"], 1);
    assert_eq!(recommendations[0]["title"], "A Study in Scarlet");
    assert_eq!(recommendations[0]["score"], 5.0);
}

#[tokio::test]
async fn test_rank_last_reports_null_scores() {
    let server = create_test_server(vec![vec![5, 5, 0]], NoSignalPolicy::RankLast);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "ratings": [0, 3, 0] }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0]["book_id"], 1);
    assert_eq!(recommendations[1]["book_id"], 3);
    assert!(recommendations[1]["score"].is_null());
}

#[tokio::test]
async fn test_empty_dataset_recommends_nothing() {
    let server = create_test_server(vec![], NoSignalPolicy::Exclude);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "ratings": [0, 0, 4] }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_recommendation_shape_mismatch() {
    let server = create_test_server(vec![vec![1, 2, 3]], NoSignalPolicy::Exclude);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "ratings": [0, 5] }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Shape mismatch"));
}

#[tokio::test]
async fn test_stored_rating_drift_is_server_error() {
    let server = create_test_server(vec![vec![1, 2]], NoSignalPolicy::Exclude);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "ratings": [0, 5, 0] }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("user 1"));
}

#[tokio::test]
async fn test_submit_rating_then_recommend() {
    let server = create_test_server(vec![], NoSignalPolicy::Exclude);

    let response = server
        .post("/api/v1/ratings")
        .json(&json!({ "ratings": [4, 0, 2] }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let created: Value = response.json();
    assert_eq!(created["user_id"], 1);
    assert_eq!(created["message"], "Rating inserted: [4, 0, 2]");

    // The new rating is now part of the peer dataset
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "ratings": [0, 0, 5] }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["book_id"], 1);
    assert_eq!(recommendations[0]["score"], 4.0);
}

#[tokio::test]
async fn test_submit_rating_out_of_range() {
    let server = create_test_server(vec![], NoSignalPolicy::Exclude);

    let response = server
        .post("/api/v1/ratings")
        .json(&json!({ "ratings": [7, 0, 0] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
