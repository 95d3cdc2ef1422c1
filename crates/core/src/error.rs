use crate::validation::bag::ErrorBag;

/// Errors produced by the validation engine.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// One or more rules rejected the input.
    #[error(transparent)]
    Failed(#[from] ValidationFailure),

    /// The rule specification itself is malformed (unknown rule, bad
    /// parameter, invalid pattern).
    #[error("Invalid rule specification: {0}")]
    Configuration(String),
}

/// Rule violations raised by [`Validator::validate`](crate::validation::engine::Validator::validate).
///
/// Carries the complete [`ErrorBag`] plus a one-line summary built from the
/// first message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{summary}")]
pub struct ValidationFailure {
    errors: ErrorBag,
    summary: String,
}

impl ValidationFailure {
    pub fn new(errors: ErrorBag) -> Self {
        let summary = summarize(&errors);
        Self { errors, summary }
    }

    /// The per-field messages that caused the failure.
    pub fn errors(&self) -> &ErrorBag {
        &self.errors
    }

    pub fn into_errors(self) -> ErrorBag {
        self.errors
    }

    /// `"<first message> (and N more errors)"`.
    pub fn summary(&self) -> &str {
        &self.summary
    }
}

fn summarize(errors: &ErrorBag) -> String {
    let Some(first) = errors.all().next() else {
        return "The given data was invalid.".to_string();
    };
    match errors.len() - 1 {
        0 => first.to_string(),
        1 => format!("{first} (and 1 more error)"),
        n => format!("{first} (and {n} more errors)"),
    }
}
