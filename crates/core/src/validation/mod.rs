//! Data validation engine.
//!
//! Provides typed rules, rule specifications keyed by dotted field paths,
//! wildcard path expansion, a locale-aware message catalog, and the
//! [`Validator`] that ties them together. All pure logic.

pub mod bag;
pub mod custom;
pub mod engine;
pub mod messages;
pub mod parse;
pub mod path;
pub mod rules;
pub mod spec;

pub use bag::ErrorBag;
pub use custom::CustomRule;
pub use engine::{validate, ValidationResult, Validator};
pub use messages::Locale;
pub use rules::{PasswordRule, Rule};
pub use spec::RuleSpecification;
