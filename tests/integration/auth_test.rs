//! Integration tests for caller identity on mutating and owned routes.

mod helpers;

use http::StatusCode;

use golinks_auth::JwtEncoder;
use golinks_core::config::AuthConfig;

const SECRET: &str = "integration-secret";

#[tokio::test]
async fn test_signed_cookie_sets_owner() {
    let app = helpers::TestApp::with_auth(SECRET);
    let cookie = app.session_cookie("ann@example.com");

    let response = app
        .request(
            "POST",
            "/team",
            Some(serde_json::json!({ "url": "https://team.example.com" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["created_by"], "ann@example.com");
}

#[tokio::test]
async fn test_missing_cookie_is_unauthorized() {
    let app = helpers::TestApp::with_auth(SECRET);

    let response = app
        .request(
            "POST",
            "/team",
            Some(serde_json::json!({ "url": "https://team.example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), Some("missing authentication token"));
    assert!(app.store.get_link_by_name("team").await.is_err());
}

#[tokio::test]
async fn test_forged_signature_is_unauthorized() {
    let app = helpers::TestApp::with_auth(SECRET);
    let forger = JwtEncoder::new(&AuthConfig {
        enabled: true,
        jwt_secret: "not-the-secret".to_string(),
        ..AuthConfig::default()
    })
    .unwrap();
    let cookie = format!("token={}", forger.issue("mallory@example.com").unwrap());

    let response = app
        .request(
            "POST",
            "/team",
            Some(serde_json::json!({ "url": "https://team.example.com" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), Some("missing authentication token"));
}

#[tokio::test]
async fn test_garbage_cookie_is_unauthorized() {
    let app = helpers::TestApp::with_auth(SECRET);

    let response = app
        .request("GET", "/api/owned", None, Some("token=not.a.jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_identity_checked_before_payload() {
    let app = helpers::TestApp::with_auth(SECRET);

    let response = app
        .send("POST", "/team", "not json".to_string(), None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_owned_lists_only_callers_links() {
    let app = helpers::TestApp::with_auth(SECRET);
    let ann = app.session_cookie("ann@example.com");
    let bob = app.session_cookie("bob@example.com");

    app.create_link("ann-one", "https://a1.example.com", 0, Some(&ann))
        .await;
    app.create_link("ann-two", "https://a2.example.com", 0, Some(&ann))
        .await;
    app.create_link("bob-one", "https://b1.example.com", 0, Some(&bob))
        .await;

    let response = app.request("GET", "/api/owned", None, Some(&ann)).await;
    assert_eq!(response.status, StatusCode::OK);
    let mut names = response.names();
    names.sort();
    assert_eq!(names, vec!["ann-one", "ann-two"]);

    let response = app.request("GET", "/api/owned", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reads_do_not_need_identity() {
    let app = helpers::TestApp::with_auth(SECRET);
    let cookie = app.session_cookie("ann@example.com");
    app.create_link("docs", "https://docs.example.com", 3, Some(&cookie))
        .await;

    let response = app.request("GET", "/docs", None, None).await;
    assert_eq!(response.status, StatusCode::FOUND);

    let response = app.request("GET", "/api/popular", None, None).await;
    assert_eq!(response.names(), vec!["docs"]);
}
