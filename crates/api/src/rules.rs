//! Rule specification and cross-field checks for the login form.

use formgate_core::validation::{ErrorBag, Locale, Rule, RuleSpecification};
use serde_json::{Map, Value};

use crate::config::ServerConfig;

pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";

/// `username` must be a bounded email address; `password` is required with
/// the configured length bounds.
pub fn login_spec(config: &ServerConfig) -> RuleSpecification {
    RuleSpecification::new()
        .field(
            USERNAME,
            [Rule::Required, Rule::Email, Rule::max(config.username_max_length)],
        )
        .field(
            PASSWORD,
            [
                Rule::Required,
                Rule::String,
                Rule::min(config.password_min_length),
                Rule::max(config.password_max_length),
            ],
        )
}

/// After-hook rejecting a password equal to the username.
///
/// Only fires when both fields are present and neither already failed.
pub fn password_differs_from_username(
    locale: Locale,
) -> impl Fn(&Map<String, Value>, &mut ErrorBag) + Send + Sync + 'static {
    move |data, errors| {
        if errors.has(USERNAME) || errors.has(PASSWORD) {
            return;
        }
        let (Some(Value::String(username)), Some(Value::String(password))) =
            (data.get(USERNAME), data.get(PASSWORD))
        else {
            return;
        };
        if username == password {
            errors.add(PASSWORD, same_credentials_message(locale));
        }
    }
}

fn same_credentials_message(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "The password must be different from the username.",
        Locale::Id => "Password harus berbeda dengan username.",
    }
}
