//! Typed rule descriptors.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::{Map, Value};

use super::custom::{CustomRule, FnRule};
use crate::error::ValidationError;

/// A single constraint attached to a field.
///
/// Rules are evaluated in declaration order. Only the implicit rules
/// (`Required`, `Present`, `Accepted` and implicit custom rules) run against
/// a missing or blank value; everything else is skipped in that case.
#[derive(Clone)]
pub enum Rule {
    /// Value is present and not null, blank, or an empty collection.
    Required,
    /// Key exists in the input, whatever its value.
    Present,
    /// `yes`, `on`, `1`, `true` (string, number or boolean).
    Accepted,
    /// A `null` value skips the field's non-implicit rules.
    Nullable,
    /// Stop evaluating the field at its first failure.
    Bail,
    String,
    /// A number, or a string that parses as one.
    Numeric,
    Integer,
    /// `true`, `false`, `0`, `1`, `"0"`, `"1"`.
    Boolean,
    /// A sequence or a mapping.
    Array,
    Email,
    Url,
    Alpha,
    AlphaNum,
    Uppercase,
    /// Lower size bound (characters, items, or numeric value).
    Min(f64),
    Max(f64),
    Between(f64, f64),
    Size(f64),
    In(Vec<String>),
    NotIn(Vec<String>),
    /// Equal to the value at another field path.
    Same(String),
    /// Different from the value at another field path.
    Different(String),
    /// Equal to `<field>_confirmation`.
    Confirmed,
    Regex(Regex),
    Password(PasswordRule),
    Custom(Arc<dyn CustomRule>),
}

impl Rule {
    pub fn min(n: impl Into<f64>) -> Self {
        Rule::Min(n.into())
    }

    pub fn max(n: impl Into<f64>) -> Self {
        Rule::Max(n.into())
    }

    pub fn between(min: impl Into<f64>, max: impl Into<f64>) -> Self {
        Rule::Between(min.into(), max.into())
    }

    pub fn size(n: impl Into<f64>) -> Self {
        Rule::Size(n.into())
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::In(values.into_iter().map(Into::into).collect())
    }

    pub fn none_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::NotIn(values.into_iter().map(Into::into).collect())
    }

    pub fn same(other: impl Into<String>) -> Self {
        Rule::Same(other.into())
    }

    pub fn different(other: impl Into<String>) -> Self {
        Rule::Different(other.into())
    }

    /// Compile `pattern` into a [`Rule::Regex`].
    pub fn regex(pattern: &str) -> Result<Self, ValidationError> {
        Regex::new(pattern)
            .map(Rule::Regex)
            .map_err(|e| ValidationError::Configuration(format!("invalid regex '{pattern}': {e}")))
    }

    /// Wrap a closure `(field, value, data) -> Option<message>` as a rule.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str, &Value, &Map<String, Value>) -> Option<String> + Send + Sync + 'static,
    {
        Rule::Custom(Arc::new(FnRule(f)))
    }

    /// Use a rule object.
    pub fn object(rule: impl CustomRule + 'static) -> Self {
        Rule::Custom(Arc::new(rule))
    }

    /// The rule's name as used in message keys and the rule-string syntax.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Present => "present",
            Rule::Accepted => "accepted",
            Rule::Nullable => "nullable",
            Rule::Bail => "bail",
            Rule::String => "string",
            Rule::Numeric => "numeric",
            Rule::Integer => "integer",
            Rule::Boolean => "boolean",
            Rule::Array => "array",
            Rule::Email => "email",
            Rule::Url => "url",
            Rule::Alpha => "alpha",
            Rule::AlphaNum => "alpha_num",
            Rule::Uppercase => "uppercase",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::Between(..) => "between",
            Rule::Size(_) => "size",
            Rule::In(_) => "in",
            Rule::NotIn(_) => "not_in",
            Rule::Same(_) => "same",
            Rule::Different(_) => "different",
            Rule::Confirmed => "confirmed",
            Rule::Regex(_) => "regex",
            Rule::Password(_) => "password",
            Rule::Custom(_) => "custom",
        }
    }

    /// Whether the rule runs even when the value is missing or blank.
    pub fn is_implicit(&self) -> bool {
        match self {
            Rule::Required | Rule::Present | Rule::Accepted => true,
            Rule::Custom(rule) => rule.implicit(),
            _ => false,
        }
    }

    /// Whether the rule makes numeric values compare by value rather than
    /// by the length of their textual form.
    pub(crate) fn is_numeric_type(&self) -> bool {
        matches!(self, Rule::Numeric | Rule::Integer)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Min(n) | Rule::Max(n) | Rule::Size(n) => write!(f, "{}:{n}", self.name()),
            Rule::Between(a, b) => write!(f, "between:{a},{b}"),
            Rule::In(values) | Rule::NotIn(values) => {
                write!(f, "{}:{}", self.name(), values.join(","))
            }
            Rule::Same(other) | Rule::Different(other) => write!(f, "{}:{other}", self.name()),
            Rule::Regex(re) => write!(f, "regex:{}", re.as_str()),
            Rule::Password(p) => write!(f, "{p:?}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Composite password strength rule.
///
/// ```
/// use formgate_core::validation::PasswordRule;
///
/// let rule = PasswordRule::min(6).letters().numbers().symbols();
/// assert_eq!(rule.min_length, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordRule {
    pub min_length: usize,
    pub letters: bool,
    pub mixed_case: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl PasswordRule {
    pub fn min(min_length: usize) -> Self {
        Self {
            min_length,
            letters: false,
            mixed_case: false,
            numbers: false,
            symbols: false,
        }
    }

    /// Require at least one letter.
    pub fn letters(mut self) -> Self {
        self.letters = true;
        self
    }

    /// Require at least one uppercase and one lowercase letter.
    pub fn mixed_case(mut self) -> Self {
        self.mixed_case = true;
        self
    }

    /// Require at least one digit.
    pub fn numbers(mut self) -> Self {
        self.numbers = true;
        self
    }

    /// Require at least one symbol, punctuation or separator character.
    pub fn symbols(mut self) -> Self {
        self.symbols = true;
        self
    }
}

impl Default for PasswordRule {
    fn default() -> Self {
        Self::min(8)
    }
}

impl From<PasswordRule> for Rule {
    fn from(rule: PasswordRule) -> Self {
        Rule::Password(rule)
    }
}
