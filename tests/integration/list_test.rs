//! Integration tests for the `/api` listing routes.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_popular_orders_by_views() {
    let app = helpers::TestApp::new();
    app.create_link("five", "https://five.example.com", 5, None)
        .await;
    app.create_link("ten", "https://ten.example.com", 10, None)
        .await;
    app.create_link("one", "https://one.example.com", 1, None)
        .await;

    let response = app.request("GET", "/api/popular", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    let views: Vec<i64> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["views"].as_i64().unwrap())
        .collect();
    assert_eq!(views, vec![10, 5, 1]);
}

#[tokio::test]
async fn test_lists_are_capped() {
    let app = helpers::TestApp::new();
    for i in 0..12 {
        app.create_link(&format!("link{i}"), "https://example.com", i, None)
            .await;
    }

    let popular = app.request("GET", "/api/popular", None, None).await;
    assert_eq!(popular.names().len(), 10);
    assert_eq!(popular.names()[0], "link11");

    let recent = app.request("GET", "/api/recent", None, None).await;
    assert_eq!(recent.status, StatusCode::OK);
    assert_eq!(recent.names().len(), 10);

    let query = app
        .request(
            "POST",
            "/api/query",
            Some(serde_json::json!({ "query": "link" })),
            None,
        )
        .await;
    assert_eq!(query.names().len(), 10);
}

#[tokio::test]
async fn test_disabled_links_are_not_listed() {
    let app = helpers::TestApp::new();
    app.create_link("keep", "https://keep.example.com", 1, None)
        .await;
    app.create_link("drop", "https://drop.example.com", 9, None)
        .await;

    let response = app.request("DELETE", "/drop", None, None).await;
    assert_eq!(response.status, StatusCode::ACCEPTED);

    let popular = app.request("GET", "/api/popular", None, None).await;
    assert_eq!(popular.names(), vec!["keep"]);

    let recent = app.request("GET", "/api/recent", None, None).await;
    assert_eq!(recent.names(), vec!["keep"]);
}

#[tokio::test]
async fn test_query_matches_name_and_description() {
    let app = helpers::TestApp::new();
    app.create_link("docs", "https://docs.example.com", 0, None)
        .await;
    app.create_link("wiki", "https://wiki.example.com", 0, None)
        .await;

    let response = app
        .request(
            "POST",
            "/api/query",
            Some(serde_json::json!({ "query": "DOCS LINK" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.names(), vec!["docs"]);

    let response = app
        .request(
            "POST",
            "/api/query",
            Some(serde_json::json!({ "query": "nope" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!([]));
}

#[tokio::test]
async fn test_query_rejects_bad_body() {
    let app = helpers::TestApp::new();

    let response = app
        .send("POST", "/api/query", "{".to_string(), None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("bad request"));
}

#[tokio::test]
async fn test_owned_lists_untracked_links_without_login() {
    let app = helpers::TestApp::new();
    app.create_link("mine", "https://mine.example.com", 0, None)
        .await;

    let response = app.request("GET", "/api/owned", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.names(), vec!["mine"]);
}

#[tokio::test]
async fn test_unknown_api_route() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/nope", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), Some("not found"));
}

#[tokio::test]
async fn test_wrong_method_on_api_route() {
    let app = helpers::TestApp::new();

    let response = app.request("POST", "/api/popular", None, None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["backend"], "memory");
}
