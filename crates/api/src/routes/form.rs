//! Route definitions for the login form.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::form;
use crate::state::AppState;

/// Browser routes, mounted at the root.
///
/// ```text
/// GET    /             -> home
/// GET    /form         -> show_form
/// POST   /form         -> submit_form
/// POST   /form/login   -> submit_form   (legacy alias)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(form::home))
        .route("/form", get(form::show_form).post(form::submit_form))
        .route("/form/login", post(form::submit_form))
}
