//! Rule evaluator: pure logic, no I/O.

use serde_json::{Map, Value};
use validator::{ValidateEmail, ValidateUrl};

use super::bag::ErrorBag;
use super::messages::{
    format_number, render, AttributeNames, Locale, MessageOverrides, MessageResolver,
};
use super::path::{self, ResolvedField};
use super::rules::{PasswordRule, Rule};
use super::spec::RuleSpecification;
use crate::error::ValidationFailure;

/// Outcome of a validation call: exactly one of the validated subset or the
/// error bag.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Input restricted to the fields named in the specification.
    Valid(Map<String, Value>),
    Invalid(ErrorBag),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    /// The error bag, when validation failed.
    pub fn errors(&self) -> Option<&ErrorBag> {
        match self {
            ValidationResult::Valid(_) => None,
            ValidationResult::Invalid(bag) => Some(bag),
        }
    }

    pub fn into_result(self) -> Result<Map<String, Value>, ValidationFailure> {
        match self {
            ValidationResult::Valid(data) => Ok(data),
            ValidationResult::Invalid(bag) => Err(ValidationFailure::new(bag)),
        }
    }
}

type AfterHook<'a> = Box<dyn Fn(&Map<String, Value>, &mut ErrorBag) + Send + Sync + 'a>;

/// Validates one input record against a [`RuleSpecification`].
///
/// Two ways to consume the outcome:
///
/// * inspect: [`evaluate`](Self::evaluate), [`passes`](Self::passes),
///   [`fails`](Self::fails), [`errors`](Self::errors);
/// * throw: [`validate`](Self::validate) returns `Err(ValidationFailure)`.
///
/// The validator holds no mutable state; every call evaluates afresh and the
/// same inputs always give the same result.
///
/// ```
/// use formgate_core::validation::{Rule, RuleSpecification, Validator};
/// use serde_json::json;
///
/// let data = json!({ "username": "admin@example.com", "password": "test1234" });
/// let spec = RuleSpecification::new()
///     .field("username", [Rule::Required, Rule::Email])
///     .field("password", [Rule::Required, Rule::min(6)]);
///
/// let validator = Validator::make(data.as_object().unwrap(), &spec);
/// assert!(validator.passes());
/// ```
pub struct Validator<'a> {
    data: &'a Map<String, Value>,
    spec: &'a RuleSpecification,
    messages: MessageOverrides,
    attributes: AttributeNames,
    locale: Locale,
    after: Vec<AfterHook<'a>>,
}

impl<'a> Validator<'a> {
    pub fn make(data: &'a Map<String, Value>, spec: &'a RuleSpecification) -> Self {
        Self {
            data,
            spec,
            messages: MessageOverrides::new(),
            attributes: AttributeNames::new(),
            locale: Locale::default(),
            after: Vec::new(),
        }
    }

    /// Message templates keyed by `field.rule` or `rule`.
    pub fn messages(mut self, messages: MessageOverrides) -> Self {
        self.messages = messages;
        self
    }

    /// Display names substituted for `:attribute`.
    pub fn attributes(mut self, attributes: AttributeNames) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Register a cross-field check that runs once after every field rule,
    /// with the full input and the in-progress error bag.
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Map<String, Value>, &mut ErrorBag) + Send + Sync + 'a,
    {
        self.after.push(Box::new(hook));
        self
    }

    pub fn evaluate(&self) -> ValidationResult {
        let errors = self.collect_errors();
        tracing::debug!(
            fields = self.spec.len(),
            errors = errors.len(),
            locale = %self.locale,
            "Validation evaluated"
        );
        if errors.is_empty() {
            ValidationResult::Valid(self.validated_subset())
        } else {
            ValidationResult::Invalid(errors)
        }
    }

    pub fn passes(&self) -> bool {
        self.collect_errors().is_empty()
    }

    pub fn fails(&self) -> bool {
        !self.passes()
    }

    /// Failure messages (empty when validation passes).
    pub fn errors(&self) -> ErrorBag {
        self.collect_errors()
    }

    /// Validate and return the validated subset, or the failure carrying
    /// the error bag.
    pub fn validate(&self) -> Result<Map<String, Value>, ValidationFailure> {
        self.evaluate().into_result()
    }

    /// Alias of [`validate`](Self::validate).
    pub fn validated(&self) -> Result<Map<String, Value>, ValidationFailure> {
        self.validate()
    }

    fn collect_errors(&self) -> ErrorBag {
        let resolver = MessageResolver::new(&self.messages, &self.attributes, self.locale);
        let mut bag = ErrorBag::new();

        for (pattern, rules) in self.spec.iter() {
            let options = FieldOptions::from_rules(rules);
            for field in path::expand(pattern, self.data) {
                let ctx = FieldContext {
                    field: &field,
                    pattern,
                    numeric: options.numeric,
                    data: self.data,
                };
                self.check_field(&ctx, rules, options, &resolver, &mut bag);
            }
        }

        for hook in &self.after {
            hook(self.data, &mut bag);
        }
        bag
    }

    fn check_field(
        &self,
        ctx: &FieldContext<'_>,
        rules: &[Rule],
        options: FieldOptions,
        resolver: &MessageResolver<'_>,
        bag: &mut ErrorBag,
    ) {
        for rule in rules {
            if !should_run(rule, ctx.field.value, options.nullable) {
                continue;
            }
            let failures = check(rule, ctx);
            if failures.is_empty() {
                continue;
            }
            for failure in failures {
                bag.add(&ctx.field.path, self.message(ctx, rule, failure, resolver));
            }
            if options.bail || rule.is_implicit() {
                break;
            }
        }
    }

    fn message(
        &self,
        ctx: &FieldContext<'_>,
        rule: &Rule,
        failure: Failure,
        resolver: &MessageResolver<'_>,
    ) -> String {
        let path = ctx.field.path.as_str();
        let attribute = resolver.attribute(path, ctx.pattern);
        let mut params = failure.params;
        match rule {
            Rule::Same(other) | Rule::Different(other) => {
                params.push(("other", resolver.attribute(&ctx.other_path(other), other)));
            }
            Rule::In(list) | Rule::NotIn(list) => params.push(("values", list.join(", "))),
            _ => {}
        }
        params.push(("value", ctx.field.value.map(textual).unwrap_or_default()));
        match &failure.message {
            Some(custom) => render(custom, &attribute, &params),
            None => render(
                resolver.template(path, ctx.pattern, rule.name(), &failure.key),
                &attribute,
                &params,
            ),
        }
    }

    /// Copy every field named in the specification (with nesting kept) out
    /// of the input. Missing fields are left out.
    fn validated_subset(&self) -> Map<String, Value> {
        let mut out = Map::new();
        for pattern in self.spec.paths() {
            for field in path::expand(pattern, self.data) {
                if let Some(value) = field.value {
                    path::assign(&mut out, self.data, &field.path, value.clone());
                }
            }
        }
        out
    }
}

/// One-shot validation with optional message overrides and locale.
pub fn validate(
    data: &Map<String, Value>,
    spec: &RuleSpecification,
    messages: Option<&MessageOverrides>,
    locale: Option<Locale>,
) -> ValidationResult {
    let mut validator = Validator::make(data, spec).locale(locale.unwrap_or_default());
    if let Some(messages) = messages {
        validator = validator.messages(messages.clone());
    }
    validator.evaluate()
}

// ---------------------------------------------------------------------------
// Per-field evaluation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
struct FieldOptions {
    nullable: bool,
    bail: bool,
    numeric: bool,
}

impl FieldOptions {
    fn from_rules(rules: &[Rule]) -> Self {
        rules.iter().fold(Self::default(), |mut options, rule| {
            match rule {
                Rule::Nullable => options.nullable = true,
                Rule::Bail => options.bail = true,
                r if r.is_numeric_type() => options.numeric = true,
                _ => {}
            }
            options
        })
    }
}

struct FieldContext<'a> {
    field: &'a ResolvedField<'a>,
    pattern: &'a str,
    numeric: bool,
    data: &'a Map<String, Value>,
}

impl FieldContext<'_> {
    /// Concrete path of a field referenced by a cross-field rule, with its
    /// wildcards bound to this field's indices.
    fn other_path(&self, other: &str) -> String {
        path::bind_wildcards(other, self.pattern, &self.field.path)
    }
}

/// A rejected value: catalog key plus placeholder parameters, or a message
/// supplied by a custom rule.
#[derive(Debug)]
struct Failure {
    key: String,
    params: Vec<(&'static str, String)>,
    message: Option<String>,
}

impl Failure {
    fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            params: Vec::new(),
            message: None,
        }
    }

    fn param(mut self, name: &'static str, value: String) -> Self {
        self.params.push((name, value));
        self
    }

    fn message(message: String) -> Self {
        Self {
            key: "custom".to_string(),
            params: Vec::new(),
            message: Some(message),
        }
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Non-implicit rules are skipped for missing or blank values, and for
/// `null` when the field is nullable.
fn should_run(rule: &Rule, value: Option<&Value>, nullable: bool) -> bool {
    if rule.is_implicit() {
        return true;
    }
    if is_blank(value) {
        return false;
    }
    !(nullable && matches!(value, Some(Value::Null)))
}

fn check(rule: &Rule, ctx: &FieldContext<'_>) -> Vec<Failure> {
    let value = ctx.field.value;
    let passed = match rule {
        Rule::Required => is_filled(value),
        Rule::Present => value.is_some(),
        Rule::Accepted => value.is_some_and(is_accepted),
        Rule::Nullable | Rule::Bail => true,
        Rule::String => value.is_some_and(Value::is_string),
        Rule::Numeric => value.is_some_and(|v| as_number(v).is_some()),
        Rule::Integer => value.is_some_and(is_integer),
        Rule::Boolean => value.is_some_and(is_boolean),
        Rule::Array => value.is_some_and(|v| v.is_array() || v.is_object()),
        Rule::Email => text(value).is_some_and(|s| s.validate_email()),
        Rule::Url => text(value).is_some_and(|s| s.validate_url()),
        Rule::Alpha => text(value).is_some_and(|s| !s.is_empty() && s.chars().all(char::is_alphabetic)),
        Rule::AlphaNum => {
            text(value).is_some_and(|s| !s.is_empty() && s.chars().all(char::is_alphanumeric))
        }
        Rule::Uppercase => text(value).is_some_and(|s| s.to_uppercase() == s),
        Rule::Min(_) | Rule::Max(_) | Rule::Between(..) | Rule::Size(_) => {
            return check_size(rule, value, ctx.numeric).into_iter().collect();
        }
        Rule::In(allowed) => value.is_some_and(|v| in_list(v, allowed)),
        Rule::NotIn(denied) => value.is_some_and(|v| !in_list(v, denied)),
        Rule::Same(other) => value == path::lookup(ctx.data, &ctx.other_path(other)),
        Rule::Different(other) => match (value, path::lookup(ctx.data, &ctx.other_path(other))) {
            (Some(v), Some(o)) => v != o,
            _ => true,
        },
        Rule::Confirmed => {
            let confirmation = format!("{}_confirmation", ctx.field.path);
            value == path::lookup(ctx.data, &confirmation)
        }
        Rule::Regex(re) => text(value).is_some_and(|s| re.is_match(s)),
        Rule::Password(password) => return check_password(password, value),
        Rule::Custom(custom) => {
            let value = value.unwrap_or(&Value::Null);
            return custom
                .evaluate(&ctx.field.path, value, ctx.data)
                .map(Failure::message)
                .into_iter()
                .collect();
        }
    };

    if passed {
        Vec::new()
    } else {
        vec![Failure::key(rule.name())]
    }
}

fn is_filled(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(_) => true,
    }
}

fn is_accepted(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => matches!(s.as_str(), "yes" | "on" | "1" | "true"),
        _ => false,
    }
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => s.trim().parse::<i64>().is_ok(),
        _ => false,
    }
}

fn is_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::Number(n) => matches!(n.as_i64(), Some(0 | 1)),
        Value::String(s) => matches!(s.as_str(), "0" | "1"),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}

/// Textual form used by `in` / `not_in` comparisons.
fn textual(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn in_list(value: &Value, list: &[String]) -> bool {
    match value {
        Value::Array(items) => items.iter().all(|item| list.contains(&textual(item))),
        other => list.contains(&textual(other)),
    }
}

#[derive(Debug, Clone, Copy)]
enum SizeKind {
    Numeric,
    String,
    Array,
}

impl SizeKind {
    fn suffix(self) -> &'static str {
        match self {
            SizeKind::Numeric => "numeric",
            SizeKind::String => "string",
            SizeKind::Array => "array",
        }
    }
}

/// Measure a value: numbers by value when the field is numeric, strings by
/// character count, collections by element count, anything else by the
/// length of its textual form.
fn measure(value: Option<&Value>, numeric: bool) -> (f64, SizeKind) {
    let Some(value) = value else {
        return (0.0, SizeKind::String);
    };
    if numeric {
        if let Some(n) = as_number(value) {
            return (n, SizeKind::Numeric);
        }
    }
    match value {
        Value::String(s) => (s.chars().count() as f64, SizeKind::String),
        Value::Array(items) => (items.len() as f64, SizeKind::Array),
        Value::Object(map) => (map.len() as f64, SizeKind::Array),
        Value::Null => (0.0, SizeKind::String),
        other => (other.to_string().chars().count() as f64, SizeKind::String),
    }
}

fn check_size(rule: &Rule, value: Option<&Value>, numeric: bool) -> Option<Failure> {
    let (size, kind) = measure(value, numeric);
    let key = format!("{}.{}", rule.name(), kind.suffix());
    match *rule {
        Rule::Min(min) if size < min => {
            Some(Failure::key(key).param("min", format_number(min)))
        }
        Rule::Max(max) if size > max => {
            Some(Failure::key(key).param("max", format_number(max)))
        }
        Rule::Between(min, max) if size < min || size > max => Some(
            Failure::key(key)
                .param("min", format_number(min))
                .param("max", format_number(max)),
        ),
        Rule::Size(expected) if size != expected => {
            Some(Failure::key(key).param("size", format_number(expected)))
        }
        _ => None,
    }
}

fn check_password(rule: &PasswordRule, value: Option<&Value>) -> Vec<Failure> {
    let Some(password) = text(value) else {
        return vec![Failure::key("string")];
    };
    let mut failures = Vec::new();
    if password.chars().count() < rule.min_length {
        failures.push(Failure::key("min.string").param("min", rule.min_length.to_string()));
    }
    if rule.letters && !password.chars().any(char::is_alphabetic) {
        failures.push(Failure::key("password.letters"));
    }
    if rule.mixed_case
        && !(password.chars().any(char::is_uppercase) && password.chars().any(char::is_lowercase))
    {
        failures.push(Failure::key("password.mixed"));
    }
    if rule.numbers && !password.chars().any(|c| c.is_numeric()) {
        failures.push(Failure::key("password.numbers"));
    }
    if rule.symbols && !password.chars().any(|c| !c.is_alphanumeric()) {
        failures.push(Failure::key("password.symbols"));
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::custom::CustomRule;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn login_spec() -> RuleSpecification {
        RuleSpecification::new()
            .field("username", [Rule::Required, Rule::Email, Rule::max(100)])
            .field("password", [Rule::Required, Rule::min(6), Rule::max(20)])
    }

    struct Uppercase;

    impl CustomRule for Uppercase {
        fn evaluate(&self, _field: &str, value: &Value, _data: &Map<String, Value>) -> Option<String> {
            let s = value.as_str().unwrap_or_default();
            (s.to_uppercase() != s).then(|| "The :attribute must be UPPERCASE.".to_string())
        }
    }

    // -- Presence ------------------------------------------------------------

    #[test]
    fn present_fields_pass() {
        let data = object(json!({ "username": "admin", "password": 123445 }));
        let spec = RuleSpecification::new()
            .field("username", [Rule::Required])
            .field("password", [Rule::Required]);
        let validator = Validator::make(&data, &spec);
        assert!(validator.passes());
        assert!(!validator.fails());
    }

    #[test]
    fn blank_and_null_fail_required() {
        let data = object(json!({ "username": "", "password": null }));
        let spec = RuleSpecification::new()
            .field("username", [Rule::Required])
            .field("password", [Rule::Required]);
        let validator = Validator::make(&data, &spec);

        assert!(validator.fails());
        let errors = validator.errors();
        assert_eq!(errors.first("username"), Some("The username field is required."));
        assert_eq!(errors.first("password"), Some("The password field is required."));
    }

    #[test]
    fn required_failure_stops_remaining_rules() {
        let data = object(json!({ "password": null }));
        let spec = RuleSpecification::new().field("password", [Rule::Required, Rule::min(6)]);
        let errors = Validator::make(&data, &spec).errors();
        assert_eq!(errors.get("password").len(), 1);
    }

    #[test]
    fn optional_missing_field_skips_rules() {
        let data = object(json!({ "name": { "first": "Sumarjo" } }));
        let spec = RuleSpecification::new()
            .field("name.first", [Rule::Required, Rule::max(90)])
            .field("name.last", [Rule::max(90)]);
        assert!(Validator::make(&data, &spec).passes());
    }

    #[test]
    fn nullable_skips_rules_for_null() {
        let data = object(json!({ "nickname": null }));
        let strict = RuleSpecification::new().field("nickname", [Rule::String]);
        let lenient = RuleSpecification::new().field("nickname", [Rule::Nullable, Rule::String]);
        assert!(Validator::make(&data, &strict).fails());
        assert!(Validator::make(&data, &lenient).passes());
    }

    // -- Scenarios -----------------------------------------------------------

    #[test]
    fn valid_login_returns_only_specified_fields() {
        let data = object(json!({
            "username": "admin@example.com",
            "password": "test1234",
            "admin": true,
            "others": "xxxx1234"
        }));
        let spec = login_spec();
        let validated = Validator::make(&data, &spec).validate().unwrap();
        assert_eq!(
            Value::Object(validated),
            json!({ "username": "admin@example.com", "password": "test1234" })
        );
    }

    #[test]
    fn short_values_fail_every_applicable_rule() {
        let data = object(json!({ "username": "ek", "password": "ek" }));
        let spec = login_spec();
        let errors = Validator::make(&data, &spec).errors();
        assert_eq!(
            errors.get("username"),
            ["The username field must be a valid email address."]
        );
        assert_eq!(
            errors.get("password"),
            ["The password field must be at least 6 characters."]
        );
    }

    #[test]
    fn throw_mode_carries_error_bag() {
        let data = object(json!({ "username": null, "password": null }));
        let spec = RuleSpecification::new()
            .field("username", [Rule::Required])
            .field("password", [Rule::Required]);
        let failure = Validator::make(&data, &spec).validate().unwrap_err();
        assert_eq!(failure.errors().len(), 2);
        assert_eq!(
            failure.to_string(),
            "The username field is required. (and 1 more error)"
        );
    }

    #[test]
    fn revalidating_validated_subset_passes() {
        let data = object(json!({
            "username": "admin@example.com",
            "password": "test1234",
            "address": [{ "city": "Bogor", "zip": "16111" }, { "city": "Salatiga" }]
        }));
        let spec = login_spec().field("address.*.city", [Rule::Required, Rule::max(100)]);
        let validated = Validator::make(&data, &spec).validate().unwrap();
        assert!(Validator::make(&validated, &spec).passes());
        assert_eq!(validated["address"], json!([{ "city": "Bogor" }, { "city": "Salatiga" }]));
    }

    // -- Messages ------------------------------------------------------------

    #[test]
    fn locale_changes_text_not_outcome() {
        let data = object(json!({ "username": "ek", "password": "ek" }));
        let spec = login_spec();
        let en = Validator::make(&data, &spec).locale(Locale::En).evaluate();
        let id = Validator::make(&data, &spec).locale(Locale::Id).evaluate();

        assert_eq!(en.is_valid(), id.is_valid());
        let (en, id) = (en.errors().unwrap(), id.errors().unwrap());
        assert_eq!(en.fields().collect::<Vec<_>>(), id.fields().collect::<Vec<_>>());
        assert_eq!(id.first("password"), Some("Password minimal berisi 6 karakter."));
        assert_ne!(en.first("password"), id.first("password"));
    }

    #[test]
    fn inline_messages_override_catalog() {
        let data = object(json!({ "username": "ek", "password": "ek" }));
        let spec = login_spec();
        let mut messages = MessageOverrides::new();
        messages.insert("email".into(), ":attribute wajib berupa email".into());
        messages.insert("min".into(), ":attribute minimal :min karakter".into());

        let errors = Validator::make(&data, &spec).messages(messages).errors();
        assert_eq!(errors.first("username"), Some("username wajib berupa email"));
        assert_eq!(errors.first("password"), Some("password minimal 6 karakter"));
    }

    #[test]
    fn value_placeholders_render_input_and_options() {
        let data = object(json!({ "role": "root" }));
        let spec = RuleSpecification::new().field("role", [Rule::one_of(["admin", "editor"])]);
        let mut messages = MessageOverrides::new();
        messages.insert("role.in".into(), ":value is not one of :values".into());

        let errors = Validator::make(&data, &spec).messages(messages).errors();
        assert_eq!(errors.first("role"), Some("root is not one of admin, editor"));
    }

    #[test]
    fn attribute_names_replace_path() {
        let data = object(json!({}));
        let spec = RuleSpecification::new().field("user_name", [Rule::Required]);
        let mut attributes = AttributeNames::new();
        attributes.insert("user_name".into(), "login".into());

        assert_eq!(
            Validator::make(&data, &spec).errors().first("user_name"),
            Some("The user name field is required.")
        );
        assert_eq!(
            Validator::make(&data, &spec).attributes(attributes).errors().first("user_name"),
            Some("The login field is required.")
        );
    }

    #[test]
    fn free_function_matches_builder() {
        let data = object(json!({ "username": "", "password": "x" }));
        let spec = login_spec();
        let result = validate(&data, &spec, None, Some(Locale::Id));
        assert_matches!(&result, ValidationResult::Invalid(bag) if bag.has("username"));
        assert_eq!(result, Validator::make(&data, &spec).locale(Locale::Id).evaluate());
    }

    // -- Cross-field ----------------------------------------------------------

    #[test]
    fn after_hook_adds_cross_field_error() {
        let data = object(json!({ "username": "eko@mail.com", "password": "eko@mail.com" }));
        let spec = login_spec();
        let validator = Validator::make(&data, &spec).after(|data, errors| {
            if data.get("username") == data.get("password") {
                errors.add("password", "Password harus berbeda dengan username");
            }
        });

        assert!(validator.fails());
        assert_eq!(
            validator.errors().get("password"),
            ["Password harus berbeda dengan username"]
        );
    }

    #[test]
    fn different_rule_compares_other_field() {
        let spec = RuleSpecification::new().field("password", [Rule::different("username")]);
        let same = object(json!({ "username": "eko", "password": "eko" }));
        let distinct = object(json!({ "username": "eko", "password": "rahasia" }));

        assert_eq!(
            Validator::make(&same, &spec).errors().first("password"),
            Some("The password field and username must be different.")
        );
        assert!(Validator::make(&distinct, &spec).passes());
    }

    #[test]
    fn cross_field_rules_bind_wildcards_per_element() {
        let data = object(json!({
            "address": [
                { "city": "Bogor", "confirm": "Bogor", "old": "Depok" },
                { "city": "Bandung", "confirm": "Bogor", "old": "Bandung" }
            ]
        }));
        let spec = RuleSpecification::new()
            .field("address.*.confirm", [Rule::same("address.*.city")])
            .field("address.*.old", [Rule::different("address.*.city")]);

        let errors = Validator::make(&data, &spec).errors();
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["address.1.confirm", "address.1.old"]);
        assert_eq!(
            errors.first("address.1.confirm"),
            Some("The address.1.confirm field must match address.1.city.")
        );
    }

    #[test]
    fn same_and_confirmed_rules() {
        let data = object(json!({
            "password": "secret1",
            "password_confirmation": "secret2",
            "repeat": "secret1"
        }));
        let spec = RuleSpecification::new()
            .field("password", [Rule::Confirmed])
            .field("repeat", [Rule::same("password")]);
        let errors = Validator::make(&data, &spec).errors();
        assert!(errors.has("password"));
        assert!(!errors.has("repeat"));
    }

    // -- Custom rules ----------------------------------------------------------

    #[test]
    fn custom_object_and_closure_rules() {
        let data = object(json!({ "username": "eko@mail.com", "password": "eko@mail.com" }));
        let spec = RuleSpecification::new()
            .field("username", [Rule::Required, Rule::object(Uppercase)])
            .field(
                "password",
                [
                    Rule::Required,
                    Rule::custom(|field, value, data| {
                        (data.get("username") == Some(value))
                            .then(|| format!("The {field} must differ from the username."))
                    }),
                ],
            );
        let errors = Validator::make(&data, &spec).errors();
        assert_eq!(errors.first("username"), Some("The username must be UPPERCASE."));
        assert_eq!(
            errors.first("password"),
            Some("The password must differ from the username.")
        );
    }

    #[test]
    fn custom_rule_skipped_for_blank_value() {
        let data = object(json!({ "username": "" }));
        let spec = RuleSpecification::new().field("username", [Rule::object(Uppercase)]);
        assert!(Validator::make(&data, &spec).passes());
    }

    #[test]
    fn rule_classes_accept_valid_values() {
        let data = object(json!({ "username": "Santi", "password": "test1222!!" }));
        let spec = RuleSpecification::new()
            .field("username", [Rule::Required, Rule::one_of(["Budi", "Eko", "Santi"])])
            .field(
                "password",
                [
                    Rule::Required,
                    PasswordRule::min(6).letters().numbers().symbols().into(),
                ],
            );
        assert!(Validator::make(&data, &spec).passes());
    }

    #[test]
    fn password_rule_reports_each_missing_class() {
        let data = object(json!({ "password": "abc" }));
        let spec = RuleSpecification::new().field(
            "password",
            [PasswordRule::min(6).numbers().symbols().mixed_case().into()],
        );
        let errors = Validator::make(&data, &spec).errors();
        assert_eq!(errors.get("password").len(), 4);
    }

    #[test]
    fn bail_stops_at_first_failure() {
        let data = object(json!({ "code": "ab" }));
        let spec = RuleSpecification::new()
            .field("code", [Rule::Bail, Rule::min(3), Rule::Uppercase]);
        let plain = RuleSpecification::new().field("code", [Rule::min(3), Rule::Uppercase]);
        assert_eq!(Validator::make(&data, &spec).errors().len(), 1);
        assert_eq!(Validator::make(&data, &plain).errors().len(), 2);
    }

    // -- Sizes and types ---------------------------------------------------------

    #[test]
    fn numeric_fields_compare_by_value() {
        let data = object(json!({ "age": 17, "pin": 1234 }));
        let spec = RuleSpecification::new()
            .field("age", [Rule::Integer, Rule::min(18)])
            .field("pin", [Rule::size(4)]);
        let errors = Validator::make(&data, &spec).errors();
        assert_eq!(errors.first("age"), Some("The age field must be at least 18."));
        assert!(!errors.has("pin"));
    }

    #[test]
    fn arrays_are_sized_by_count() {
        let data = object(json!({ "tags": ["a", "b", "c"] }));
        let spec = RuleSpecification::new().field("tags", [Rule::Array, Rule::max(2)]);
        assert_eq!(
            Validator::make(&data, &spec).errors().first("tags"),
            Some("The tags field must not have more than 2 items.")
        );
    }

    #[test]
    fn type_rules() {
        let data = object(json!({
            "flag": "1",
            "count": "12",
            "ratio": "x",
            "site": "https://example.com",
            "name": "Eko2"
        }));
        let spec = RuleSpecification::new()
            .field("flag", [Rule::Boolean])
            .field("count", [Rule::Integer])
            .field("ratio", [Rule::Numeric])
            .field("site", [Rule::Url])
            .field("name", [Rule::Alpha]);
        let errors = Validator::make(&data, &spec).errors();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["ratio", "name"]);
    }

    // -- Nested paths ------------------------------------------------------------

    #[test]
    fn nested_object_paths_pass() {
        let data = object(json!({
            "name": { "first": "Sumarjo", "last": "Kurniawan" },
            "address": { "street": "Jalan Gunung", "city": "Bogor", "country": "Indonesia" }
        }));
        let spec = RuleSpecification::new()
            .field("name.first", [Rule::Required, Rule::max(90)])
            .field("name.last", [Rule::max(90)])
            .field("address.street", [Rule::max(200)])
            .field("address.city", [Rule::Required, Rule::max(100)])
            .field("address.country", [Rule::Required, Rule::max(100)]);
        assert!(Validator::make(&data, &spec).passes());
    }

    #[test]
    fn wildcard_requires_every_element() {
        let spec = RuleSpecification::new()
            .field("address.*.street", [Rule::max(200)])
            .field("address.*.city", [Rule::Required, Rule::max(100)]);
        let complete = object(json!({
            "address": [
                { "street": "Jalan Gunung", "city": "Bogor" },
                { "street": "Jalan Kemiri", "city": "Salatiga" }
            ]
        }));
        let partial = object(json!({
            "address": [
                { "street": "Jalan Gunung", "city": "Bogor" },
                { "street": "Jalan Kemiri" }
            ]
        }));

        assert!(Validator::make(&complete, &spec).passes());
        let errors = Validator::make(&partial, &spec).errors();
        assert_eq!(
            errors.first("address.1.city"),
            Some("The address.1.city field is required.")
        );
        assert!(!errors.has("address.0.city"));
    }
}
