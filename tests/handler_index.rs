mod common;

use axum::Router;
use axum_test::TestServer;
use split_shortener::{api, web};

#[tokio::test]
async fn test_index_renders_form() {
    let state = common::create_test_state();
    let app = Router::new().merge(web::routes::routes()).with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/").await;

    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains(r#"action="/new""#));
    assert!(html.contains(r#"name="gurl""#));
    assert!(html.contains("8 characters"));
}

#[tokio::test]
async fn test_form_post_then_redirect() {
    let state = common::create_test_state();
    let app = Router::new()
        .merge(web::routes::routes())
        .merge(api::routes::routes())
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let slug = server
        .post("/new")
        .form(&[
            ("gurl", "https://good.example"),
            ("gcount", "1"),
            ("burl", "https://bad.example"),
            ("bcount", "1"),
        ])
        .await
        .json::<serde_json::Value>()["slug"]
        .as_str()
        .unwrap()
        .to_string();

    let path = format!("/r/{}", slug);
    assert_eq!(server.get(&path).await.header("location"), "https://good.example");
    assert_eq!(server.get(&path).await.header("location"), "https://bad.example");
    assert_eq!(server.get(&path).await.header("location"), "https://good.example");
}
