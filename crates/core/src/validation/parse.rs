//! Rule-string syntax (`"required|email|max:100"`).
//!
//! Accepted for callers that describe rules as text, such as the JSON
//! validation endpoint. Rust callers build [`Rule`] values directly.

use std::str::FromStr;

use super::rules::{PasswordRule, Rule};
use crate::error::ValidationError;

/// Parse a `|`-separated rule list. Use [`parse_rule_list`] when a regex
/// pattern itself contains `|`.
pub fn parse_rules(spec: &str) -> Result<Vec<Rule>, ValidationError> {
    spec.split('|')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}

/// Parse a list of individual rule strings.
pub fn parse_rule_list<I, S>(items: I) -> Result<Vec<Rule>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().trim().parse())
        .collect()
}

impl FromStr for Rule {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, param) = match s.split_once(':') {
            Some((name, param)) => (name.trim(), Some(param.trim())),
            None => (s.trim(), None),
        };

        let rule = match name {
            "required" => Rule::Required,
            "present" => Rule::Present,
            "accepted" => Rule::Accepted,
            "nullable" => Rule::Nullable,
            "bail" => Rule::Bail,
            "string" => Rule::String,
            "numeric" => Rule::Numeric,
            "integer" => Rule::Integer,
            "boolean" | "bool" => Rule::Boolean,
            "array" => Rule::Array,
            "email" => Rule::Email,
            "url" => Rule::Url,
            "alpha" => Rule::Alpha,
            "alpha_num" => Rule::AlphaNum,
            "uppercase" => Rule::Uppercase,
            "confirmed" => Rule::Confirmed,
            "min" => Rule::Min(number(name, require(name, param)?)?),
            "max" => Rule::Max(number(name, require(name, param)?)?),
            "size" => Rule::Size(number(name, require(name, param)?)?),
            "between" => {
                let param = require(name, param)?;
                let (low, high) = param.split_once(',').ok_or_else(|| {
                    ValidationError::Configuration(format!("rule 'between' needs two bounds, got '{param}'"))
                })?;
                let (low, high) = (number(name, low)?, number(name, high)?);
                if low > high {
                    return Err(ValidationError::Configuration(format!(
                        "rule 'between' lower bound {low} exceeds upper bound {high}"
                    )));
                }
                Rule::Between(low, high)
            }
            "in" => Rule::In(list(require(name, param)?)),
            "not_in" => Rule::NotIn(list(require(name, param)?)),
            "same" => Rule::Same(require(name, param)?.to_string()),
            "different" => Rule::Different(require(name, param)?.to_string()),
            "regex" => Rule::regex(&delimited_pattern(require(name, param)?))?,
            "password" => Rule::Password(password(param)?),
            other => {
                return Err(ValidationError::Configuration(format!(
                    "unknown rule '{other}'"
                )))
            }
        };
        Ok(rule)
    }
}

fn require<'a>(name: &str, param: Option<&'a str>) -> Result<&'a str, ValidationError> {
    param.filter(|p| !p.is_empty()).ok_or_else(|| {
        ValidationError::Configuration(format!("rule '{name}' requires a parameter"))
    })
}

/// Parse a finite bound; `NaN` and infinities are rejected.
fn number(name: &str, raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| {
            ValidationError::Configuration(format!("rule '{name}' expects a number, got '{raw}'"))
        })
}

fn list(raw: &str) -> Vec<String> {
    raw.split(',').map(|v| v.trim().to_string()).collect()
}

/// Accept both `^[a-z]+$` and the delimited `/^[a-z]+$/i` form.
fn delimited_pattern(raw: &str) -> String {
    if let Some(body) = raw.strip_prefix('/') {
        if let Some(end) = body.rfind('/') {
            let (pattern, flags) = (&body[..end], &body[end + 1..]);
            let flags: String = flags.chars().filter(|c| "imsux".contains(*c)).collect();
            return if flags.is_empty() {
                pattern.to_string()
            } else {
                format!("(?{flags}){pattern}")
            };
        }
    }
    raw.to_string()
}

/// `password` or `password:<min>,letters,mixed,numbers,symbols`.
fn password(param: Option<&str>) -> Result<PasswordRule, ValidationError> {
    let Some(param) = param else {
        return Ok(PasswordRule::default());
    };
    let mut rule = PasswordRule::default();
    for option in param.split(',').map(str::trim).filter(|o| !o.is_empty()) {
        rule = match option {
            "letters" => rule.letters(),
            "mixed" | "mixed_case" => rule.mixed_case(),
            "numbers" => rule.numbers(),
            "symbols" => rule.symbols(),
            n => PasswordRule {
                min_length: n.parse().map_err(|_| {
                    ValidationError::Configuration(format!("unknown password option '{n}'"))
                })?,
                ..rule
            },
        };
    }
    Ok(rule)
}
