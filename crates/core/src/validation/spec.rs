//! Field path → rule list mapping for one validation call.

use indexmap::IndexMap;

use super::parse::{parse_rule_list, parse_rules};
use super::rules::Rule;
use crate::error::ValidationError;

/// Ordered mapping from field path (optionally with `*` wildcards) to the
/// rules applied to it.
///
/// Built with the consuming builder methods and read-only afterwards.
///
/// ```
/// use formgate_core::validation::{Rule, RuleSpecification};
///
/// let spec = RuleSpecification::new()
///     .field("username", [Rule::Required, Rule::Email, Rule::max(100)])
///     .field("password", [Rule::Required, Rule::min(6), Rule::max(20)]);
/// assert_eq!(spec.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSpecification {
    fields: IndexMap<String, Vec<Rule>>,
}

impl RuleSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `rules` to `path`, appending to any rules it already has.
    pub fn field(mut self, path: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.entry(path.into()).or_default().extend(rules);
        self
    }

    /// Attach rules written as `"required|email|max:100"`.
    pub fn parse_field(self, path: impl Into<String>, rules: &str) -> Result<Self, ValidationError> {
        Ok(self.field(path, parse_rules(rules)?))
    }

    /// Attach rules written as a list, e.g. `["required", "min:6"]`.
    pub fn parse_field_list<I, S>(self, path: impl Into<String>, rules: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.field(path, parse_rule_list(rules)?))
    }

    pub fn rules_for(&self, path: &str) -> Option<&[Rule]> {
        self.fields.get(path).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.fields
            .iter()
            .map(|(path, rules)| (path.as_str(), rules.as_slice()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
