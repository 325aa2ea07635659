mod common;

use axum::{Router, routing::put};
use axum_test::TestServer;
use split_shortener::api::handlers::edit_handler;

#[tokio::test]
async fn test_edit_echoes_slug() {
    let state = common::create_test_state();
    let app = Router::new()
        .route("/edit/{slug}", put(edit_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.put("/edit/abc1234").await;

    response.assert_status_ok();
    response.assert_json(&serde_json::json!({ "slug": "abc1234" }));
}

#[tokio::test]
async fn test_edit_does_not_touch_record() {
    let state = common::create_test_state();
    let slug = common::create_test_slug(&state, "https://example.com", 4, None, 0).await;

    let app = Router::new()
        .route("/edit/{slug}", put(edit_handler))
        .with_state(state.clone());

    let server = TestServer::new(app).unwrap();

    server
        .put(&format!("/edit/{}", slug))
        .await
        .assert_status_ok();

    let record = state.registry.get(&slug).await.unwrap();
    assert_eq!(record.primary_remaining, 4);
}
