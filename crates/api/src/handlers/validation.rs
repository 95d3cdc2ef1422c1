//! Handler for `POST /api/v1/validate`.
//!
//! Runs the engine in throw mode: a failure propagates as
//! [`AppError::Validation`] and becomes a 422 response.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use formgate_core::error::ValidationError;
use formgate_core::validation::messages::{AttributeNames, MessageOverrides};
use formgate_core::validation::{Locale, RuleSpecification, Validator};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Rules for one field: `"required|email"` or `["required", "email"]`.
///
/// The list form is needed for parameters that contain `|`, such as
/// `regex:/^(a|b)$/`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RuleInput {
    Pipe(String),
    List(Vec<String>),
}

/// Request body for `POST /api/v1/validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Field path to rules. Kept as raw JSON so a bad entry is reported as
    /// a malformed rule specification.
    pub rules: IndexMap<String, Value>,
    #[serde(default)]
    pub messages: MessageOverrides,
    #[serde(default)]
    pub attributes: AttributeNames,
    /// Overrides the configured locale for this call.
    pub locale: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub validated: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/validate
///
/// Validate `data` against `rules` and return the validated subset.
pub async fn validate(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<ValidateResponse>>> {
    let Json(input) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    if input.rules.is_empty() {
        return Err(AppError::BadRequest("rules must name at least one field".into()));
    }

    let spec = build_spec(input.rules)?;
    let locale = input
        .locale
        .as_deref()
        .map(Locale::from_tag)
        .unwrap_or(state.config.locale);

    let validated = Validator::make(&input.data, &spec)
        .messages(input.messages)
        .attributes(input.attributes)
        .locale(locale)
        .validate()?;

    tracing::info!(fields = spec.len(), %locale, "Payload validated");

    Ok(Json(DataResponse {
        data: ValidateResponse { validated },
    }))
}

fn build_spec(rules: IndexMap<String, Value>) -> AppResult<RuleSpecification> {
    let mut spec = RuleSpecification::new();
    for (path, raw) in rules {
        let input: RuleInput = serde_json::from_value(raw).map_err(|_| {
            ValidationError::Configuration(format!(
                "rules for '{path}' must be a string or a list of strings"
            ))
        })?;
        spec = match input {
            RuleInput::Pipe(rules) => spec.parse_field(path, &rules)?,
            RuleInput::List(rules) => spec.parse_field_list(path, rules)?,
        };
    }
    Ok(spec)
}
