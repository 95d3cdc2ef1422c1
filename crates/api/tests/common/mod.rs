#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use formgate_core::csrf;
use formgate_core::validation::Locale;
use http_body_util::BodyExt;
use tower::ServiceExt;

use formgate_api::config::ServerConfig;
use formgate_api::router::build_app_router;
use formgate_api::state::AppState;

/// Fixed application key so tests can mint valid form tokens.
pub const TEST_APP_KEY: &str = "integration-test-app-key";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// English messages and the default credential bounds.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        locale: Locale::En,
        app_key: TEST_APP_KEY.to_string(),
        csrf_token_ttl_secs: 7200,
        username_max_length: 100,
        password_min_length: 6,
        password_max_length: 20,
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app() -> Router {
    build_app_with(test_config())
}

pub fn build_app_with(config: ServerConfig) -> Router {
    let state = AppState::new(config.clone());
    build_app_router(state, &config)
}

/// A token accepted by apps built from [`test_config`].
pub fn valid_token() -> String {
    csrf::issue_token(TEST_APP_KEY.as_bytes())
}

/// `Cookie` header value carrying `token` as the anti-forgery cookie.
pub fn token_cookie(token: &str) -> String {
    format!("{}={token}", csrf::COOKIE_NAME)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST `fields` as `application/x-www-form-urlencoded`, optionally with a
/// `Cookie` header.
pub async fn post_form(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    cookie: Option<&str>,
) -> Response {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", url_encode(k), url_encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let mut request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

/// Submit the login form the way a browser that loaded it would: a fresh
/// token in both the `_token` field and the cookie.
pub async fn submit_login(app: Router, uri: &str, fields: &[(&str, &str)]) -> Response {
    let token = valid_token();
    let mut with_token = vec![(csrf::TOKEN_FIELD, token.as_str())];
    with_token.extend_from_slice(fields);
    post_form(app, uri, &with_token, Some(&token_cookie(&token))).await
}

fn url_encode(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
