//! Per-field collection of failure messages.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from field path to its failure messages.
///
/// Fields keep the order in which their first message was added and each
/// field's messages keep insertion order. Adding a message a field already
/// carries is a no-op. Serializes as `{ "field": ["message", ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorBag {
    messages: IndexMap<String, Vec<String>>,
}

impl ErrorBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure message against `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let message = message.into();
        let entry = self.messages.entry(field.into()).or_default();
        if !entry.contains(&message) {
            entry.push(message);
        }
    }

    /// Whether `field` has at least one message.
    pub fn has(&self, field: &str) -> bool {
        self.messages.get(field).is_some_and(|m| !m.is_empty())
    }

    /// All messages recorded for `field` (empty when none).
    pub fn get(&self, field: &str) -> &[String] {
        self.messages.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }

    /// Every message in field order, then insertion order.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.messages.values().flatten().map(String::as_str)
    }

    /// Field paths that have messages.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.messages
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    pub fn any(&self) -> bool {
        !self.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.values().all(Vec::is_empty)
    }

    /// Total number of messages across all fields.
    pub fn len(&self) -> usize {
        self.messages.values().map(Vec::len).sum()
    }

    /// Append every message of `other`, keeping this bag's field order first.
    pub fn merge(&mut self, other: ErrorBag) {
        for (field, messages) in other.messages {
            for message in messages {
                self.add(field.clone(), message);
            }
        }
    }
}
