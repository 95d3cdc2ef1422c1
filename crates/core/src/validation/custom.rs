//! Caller-defined rules.

use serde_json::{Map, Value};

/// A rule supplied by the caller rather than built into the engine.
///
/// Rule objects implement this directly; plain closures are wrapped with
/// [`Rule::custom`](super::rules::Rule::custom). `evaluate` receives the
/// concrete field path, the field value (`Null` when the field is missing)
/// and read access to the full input, and returns a failure message when
/// the value is rejected. Messages may use the `:attribute` placeholder.
pub trait CustomRule: Send + Sync {
    fn evaluate(&self, field: &str, value: &Value, data: &Map<String, Value>) -> Option<String>;

    /// Implicit rules also run when the value is missing or blank.
    fn implicit(&self) -> bool {
        false
    }
}

/// Adapter that lets a closure act as a [`CustomRule`].
pub(crate) struct FnRule<F>(pub(crate) F);

impl<F> CustomRule for FnRule<F>
where
    F: Fn(&str, &Value, &Map<String, Value>) -> Option<String> + Send + Sync,
{
    fn evaluate(&self, field: &str, value: &Value, data: &Map<String, Value>) -> Option<String> {
        (self.0)(field, value, data)
    }
}
