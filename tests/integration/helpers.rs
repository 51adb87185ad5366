//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use golinks_auth::{IdentityResolver, JwtEncoder};
use golinks_core::config::{AppConfig, AuthConfig};
use golinks_core::traits::store::LinkStore;
use golinks_store::MemoryLinkStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The store behind the router, for direct inspection
    pub store: Arc<dyn LinkStore>,
    /// Signs session cookies when auth is enabled
    pub encoder: Option<JwtEncoder>,
}

impl TestApp {
    /// App over an empty memory store with login disabled.
    pub fn new() -> Self {
        Self::build(AppConfig::default())
    }

    /// App over an empty memory store that requires a session cookie
    /// signed with `secret`.
    pub fn with_auth(secret: &str) -> Self {
        let mut config = AppConfig::default();
        config.auth = AuthConfig {
            enabled: true,
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        };
        Self::build(config)
    }

    /// App with a canonical host name configured.
    pub fn with_fqdn(fqdn: &str) -> Self {
        let mut config = AppConfig::default();
        config.server.fqdn = fqdn.to_string();
        Self::build(config)
    }

    fn build(config: AppConfig) -> Self {
        let identity = IdentityResolver::new(&config.auth).expect("Failed to build identity");
        let encoder = config
            .auth
            .enabled
            .then(|| JwtEncoder::new(&config.auth).expect("Failed to build encoder"));
        let store: Arc<dyn LinkStore> = Arc::new(MemoryLinkStore::new());
        let state = golinks_api::AppState::new(config, Arc::clone(&store), identity);
        let router = golinks_api::build_app(state);

        Self {
            router,
            store,
            encoder,
        }
    }

    /// A signed session cookie value for `email`.
    pub fn session_cookie(&self, email: &str) -> String {
        let token = self
            .encoder
            .as_ref()
            .expect("Auth is not enabled for this app")
            .issue(email)
            .expect("Failed to issue token");
        format!("token={token}")
    }

    /// Create a link through the API and assert it was accepted.
    pub async fn create_link(&self, name: &str, url: &str, views: i64, cookie: Option<&str>) {
        let response = self
            .request(
                "POST",
                &format!("/{name}"),
                Some(serde_json::json!({
                    "url": url,
                    "description": format!("{name} link"),
                    "views": views,
                })),
                cookie,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.send(method, path, body_str, cookie, None).await
    }

    /// Make a request with a raw body and an optional `Host` header.
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: String,
        cookie: Option<&str>,
        host: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        if let Some(host) = host {
            req = req.header(header::HOST, host);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
    /// Raw body text
    pub text: String,
}

impl TestResponse {
    /// The `Location` header, if any.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The `error` field of a JSON error body.
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }

    /// Names from a JSON array of links, in order.
    pub fn names(&self) -> Vec<String> {
        self.body
            .as_array()
            .map(|links| {
                links
                    .iter()
                    .filter_map(|l| l.get("name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
