//! Integration tests for the link dispatcher.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_create_then_follow() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/site",
            Some(serde_json::json!({
                "url": "https://example.com",
                "description": "an example",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["name"], "site");
    assert_eq!(response.body["url"], "https://example.com");
    assert_eq!(response.body["created_by"], "untracked");
    assert_eq!(response.body["views"], 0);

    let response = app.request("GET", "/site", None, None).await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), Some("https://example.com"));

    let stored = app.store.get_link_by_name("site").await.unwrap();
    assert_eq!(stored.views, 1);
}

#[tokio::test]
async fn test_follow_is_case_insensitive() {
    let app = helpers::TestApp::new();
    app.create_link("Docs", "https://docs.example.com", 0, None)
        .await;

    let response = app.request("GET", "/DOCS/", None, None).await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), Some("https://docs.example.com"));
}

#[tokio::test]
async fn test_nested_name() {
    let app = helpers::TestApp::new();
    app.create_link("team/wiki", "https://wiki.example.com", 0, None)
        .await;

    let response = app.request("GET", "/team/wiki", None, None).await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), Some("https://wiki.example.com"));
}

#[tokio::test]
async fn test_duplicate_create_conflicts() {
    let app = helpers::TestApp::new();
    app.create_link("site", "https://example.com", 0, None).await;

    let response = app
        .request(
            "POST",
            "/SITE",
            Some(serde_json::json!({ "url": "https://other.example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error(), Some("link already exists"));

    let stored = app.store.get_link_by_name("site").await.unwrap();
    assert_eq!(stored.url, "https://example.com");
}

#[tokio::test]
async fn test_unknown_link_redirects_home() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/nothing-here", None, None).await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
async fn test_unknown_link_redirects_to_fqdn() {
    let app = helpers::TestApp::with_fqdn("go.example.com");

    let response = app
        .send("GET", "/nothing-here", String::new(), None, Some("go.example.com"))
        .await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("//go.example.com/"));
}

#[tokio::test]
async fn test_other_host_redirects_to_canonical() {
    let app = helpers::TestApp::with_fqdn("go.example.com");

    let response = app
        .send("GET", "/docs", String::new(), None, Some("go"))
        .await;
    assert_eq!(response.status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.location(), Some("//go.example.com/docs"));
}

#[tokio::test]
async fn test_invalid_names_rejected() {
    let app = helpers::TestApp::new();

    for path in ["/-bad", "/bad-", "/ba%20d", "/under_score"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "path {path}");
        assert_eq!(response.error(), Some("name input is invalid"));
    }

    let response = app.request("GET", "/", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("link is empty"));
}

#[tokio::test]
async fn test_reserved_names_forbidden() {
    let app = helpers::TestApp::new();

    for path in ["/static", "/static/app.js", "/STATIC"] {
        let response = app
            .request(
                "POST",
                path,
                Some(serde_json::json!({ "url": "https://example.com" })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "path {path}");
        assert!(response.text.is_empty());
    }
}

#[tokio::test]
async fn test_invalid_payloads() {
    let app = helpers::TestApp::new();

    let bodies = [
        "not json".to_string(),
        "{}".to_string(),
        r#"{"url": ""}"#.to_string(),
        r#"{"url": "   "}"#.to_string(),
        r#"{"url": "https://example.com", "views": -1}"#.to_string(),
    ];
    for body in bodies {
        let response = app.send("POST", "/site", body.clone(), None, None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(response.error(), Some("invalid payload"));
    }
    assert!(app.store.get_link_by_name("site").await.is_err());
}

#[tokio::test]
async fn test_payload_name_is_ignored() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/from-path",
            Some(serde_json::json!({
                "name": "from-body",
                "url": "https://example.com",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["name"], "from-path");
    assert!(app.store.get_link_by_name("from-body").await.is_err());
}

#[tokio::test]
async fn test_delete_then_recreate() {
    let app = helpers::TestApp::new();
    app.create_link("site", "https://example.com", 4, None).await;

    let response = app.request("DELETE", "/site", None, None).await;
    assert_eq!(response.status, StatusCode::ACCEPTED);

    let response = app.request("GET", "/site", None, None).await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);

    let response = app.request("DELETE", "/site", None, None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error(), Some("internal server error"));

    app.create_link("site", "https://new.example.com", 0, None)
        .await;
    let response = app.request("GET", "/site", None, None).await;
    assert_eq!(response.location(), Some("https://new.example.com"));
}

#[tokio::test]
async fn test_delete_unknown_is_server_error() {
    let app = helpers::TestApp::new();

    let response = app.request("DELETE", "/ghost", None, None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_options_and_unsupported_methods() {
    let app = helpers::TestApp::new();

    let response = app.request("OPTIONS", "/site", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.is_empty());

    let response = app.request("PUT", "/site", None, None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(response.text.is_empty());
}

#[tokio::test]
async fn test_oversized_view_seed_rejected() {
    let app = helpers::TestApp::new();

    let body = r#"{"url": "https://example.com", "views": 9223372036854775807}"#;
    let response = app.send("POST", "/hot", body.to_string(), None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("invalid payload"));
    assert!(app.store.get_link_by_name("hot").await.is_err());
}

#[tokio::test]
async fn test_unredirectable_target_rejected() {
    let app = helpers::TestApp::new();

    let body = r#"{"url": "https://example.com/\u0001"}"#;
    let response = app.send("POST", "/ctl", body.to_string(), None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("invalid payload"));

    let response = app.request("GET", "/ctl", None, None).await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
}
