pub mod form;
pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers::validation;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /validate                                        validate a JSON payload (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/validate", post(validation::validate))
}

/// Build the browser-facing route tree (HTML form and landing page).
pub fn web_routes() -> Router<AppState> {
    form::router()
}
