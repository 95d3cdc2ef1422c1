//! Handlers for the login form.
//!
//! The form is validated in inspect mode: a failing submission re-renders
//! the page with the error list instead of raising.

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use formgate_core::csrf::{self, COOKIE_NAME};
use formgate_core::validation::{ValidationResult, Validator};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::rules::{self, PASSWORD, USERNAME};
use crate::state::AppState;
use crate::views::{self, FormView};

/// Where a successful submission lands.
const SUCCESS_REDIRECT: &str = "/";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Form body for `POST /form` and `POST /form/login`.
///
/// Every field is optional so that a missing field reaches the validator
/// instead of being rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "_token")]
    pub token: Option<String>,
}

impl LoginForm {
    /// Input record handed to the validator; absent fields stay absent.
    fn to_data(&self) -> Map<String, Value> {
        let mut data = Map::new();
        if let Some(username) = &self.username {
            data.insert(USERNAME.into(), Value::String(username.clone()));
        }
        if let Some(password) = &self.password {
            data.insert(PASSWORD.into(), Value::String(password.clone()));
        }
        data
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
pub async fn home() -> Html<String> {
    Html(views::render_home())
}

/// GET /form
///
/// Render an empty form. The fresh anti-forgery token goes into both the
/// hidden field and the cookie.
pub async fn show_form(State(state): State<AppState>) -> Response {
    let token = csrf::issue_token(state.app_key());
    let html = views::render_form(&FormView {
        token: &token,
        action: "/form",
        ..Default::default()
    });
    (
        [(header::SET_COOKIE, token_cookie(&token, state.config.csrf_token_ttl_secs))],
        Html(html),
    )
        .into_response()
}

/// POST /form, POST /form/login
///
/// Verify the token against its cookie, validate the credentials and either
/// redirect (303) or re-render the form with 422 and the error list. The
/// password is never echoed back.
pub async fn submit_form(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Form(input): Form<LoginForm>,
) -> AppResult<Response> {
    let ttl = state.config.csrf_token_ttl_secs;
    if let Err(reason) = csrf::verify_submission(
        state.app_key(),
        input.token.as_deref(),
        read_cookie(&headers, COOKIE_NAME),
        ttl,
        chrono::Utc::now().timestamp(),
    ) {
        tracing::warn!(path = %uri.path(), %reason, "Rejected form submission");
        return Err(AppError::CsrfMismatch);
    }

    let locale = state.config.locale;
    let data = input.to_data();
    let spec = rules::login_spec(&state.config);
    let outcome = Validator::make(&data, &spec)
        .locale(locale)
        .after(rules::password_differs_from_username(locale))
        .evaluate();

    match outcome {
        ValidationResult::Valid(_) => {
            tracing::debug!("Login form accepted");
            Ok(Redirect::to(SUCCESS_REDIRECT).into_response())
        }
        ValidationResult::Invalid(errors) => {
            tracing::debug!(errors = errors.len(), "Login form rejected");
            let token = csrf::issue_token(state.app_key());
            let html = views::render_form(&FormView {
                username: input.username.as_deref().unwrap_or_default(),
                errors: Some(&errors),
                token: &token,
                action: uri.path(),
            });
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                [(header::SET_COOKIE, token_cookie(&token, ttl))],
                Html(html),
            )
                .into_response())
        }
    }
}

// ---------------------------------------------------------------------------
// Cookie helpers
// ---------------------------------------------------------------------------

/// `Set-Cookie` value carrying the token copy for the double-submit check.
pub fn token_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{COOKIE_NAME}={token}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Strict")
}

/// First value of cookie `name` across all `Cookie` headers.
fn read_cookie<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
