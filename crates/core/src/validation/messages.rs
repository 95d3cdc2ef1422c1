//! Message templates, locale catalog, and placeholder substitution.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Caller-supplied message templates keyed by `field.rule` or `rule`.
pub type MessageOverrides = IndexMap<String, String>;

/// Caller-supplied display names keyed by field path or pattern.
pub type AttributeNames = IndexMap<String, String>;

/// Locales with a built-in message catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Id,
}

impl Locale {
    /// Parse a language tag such as `id`, `en_US` or `id-ID`, falling back
    /// to English for anything without a catalog.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Id => "id",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported locale: {0}")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = s
            .split(['_', '-'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Ok(Locale::En),
            "id" => Ok(Locale::Id),
            _ => Err(UnsupportedLocale(s.to_string())),
        }
    }
}

/// Built-in template for `key` in `locale`.
///
/// Size rules use `<rule>.numeric`, `<rule>.string` or `<rule>.array` keys.
pub fn catalog(locale: Locale, key: &str) -> Option<&'static str> {
    match locale {
        Locale::En => english(key),
        Locale::Id => indonesian(key),
    }
}

/// Template used when neither an override nor a catalog entry exists.
pub fn fallback(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "The :attribute field is invalid.",
        Locale::Id => ":Attribute tidak valid.",
    }
}

fn english(key: &str) -> Option<&'static str> {
    let template = match key {
        "required" => "The :attribute field is required.",
        "present" => "The :attribute field must be present.",
        "accepted" => "The :attribute field must be accepted.",
        "string" => "The :attribute field must be a string.",
        "numeric" => "The :attribute field must be a number.",
        "integer" => "The :attribute field must be an integer.",
        "boolean" => "The :attribute field must be true or false.",
        "array" => "The :attribute field must be an array.",
        "email" => "The :attribute field must be a valid email address.",
        "url" => "The :attribute field must be a valid URL.",
        "alpha" => "The :attribute field must only contain letters.",
        "alpha_num" => "The :attribute field must only contain letters and numbers.",
        "uppercase" => "The :attribute field must be uppercase.",
        "min.numeric" => "The :attribute field must be at least :min.",
        "min.string" => "The :attribute field must be at least :min characters.",
        "min.array" => "The :attribute field must have at least :min items.",
        "max.numeric" => "The :attribute field must not be greater than :max.",
        "max.string" => "The :attribute field must not be greater than :max characters.",
        "max.array" => "The :attribute field must not have more than :max items.",
        "between.numeric" => "The :attribute field must be between :min and :max.",
        "between.string" => "The :attribute field must be between :min and :max characters.",
        "between.array" => "The :attribute field must have between :min and :max items.",
        "size.numeric" => "The :attribute field must be :size.",
        "size.string" => "The :attribute field must be :size characters.",
        "size.array" => "The :attribute field must contain :size items.",
        "in" | "not_in" => "The selected :attribute is invalid.",
        "same" => "The :attribute field must match :other.",
        "different" => "The :attribute field and :other must be different.",
        "confirmed" => "The :attribute field confirmation does not match.",
        "regex" => "The :attribute field format is invalid.",
        "password.letters" => "The :attribute field must contain at least one letter.",
        "password.mixed" => {
            "The :attribute field must contain at least one uppercase and one lowercase letter."
        }
        "password.numbers" => "The :attribute field must contain at least one number.",
        "password.symbols" => "The :attribute field must contain at least one symbol.",
        _ => return None,
    };
    Some(template)
}

fn indonesian(key: &str) -> Option<&'static str> {
    let template = match key {
        "required" => ":Attribute wajib diisi.",
        "present" => ":Attribute wajib ada.",
        "accepted" => ":Attribute harus diterima.",
        "string" => ":Attribute harus berupa string.",
        "numeric" => ":Attribute harus berupa angka.",
        "integer" => ":Attribute harus berupa bilangan bulat.",
        "boolean" => ":Attribute harus bernilai true atau false.",
        "array" => ":Attribute harus berupa sebuah array.",
        "email" => ":Attribute harus berupa alamat surel yang valid.",
        "url" | "regex" => "Format :attribute tidak valid.",
        "alpha" => ":Attribute hanya boleh berisi huruf.",
        "alpha_num" => ":Attribute hanya boleh berisi huruf dan angka.",
        "uppercase" => ":Attribute harus berupa huruf kapital.",
        "min.numeric" => ":Attribute minimal bernilai :min.",
        "min.string" => ":Attribute minimal berisi :min karakter.",
        "min.array" => ":Attribute minimal terdiri dari :min anggota.",
        "max.numeric" => ":Attribute maksimal bernilai :max.",
        "max.string" => ":Attribute maksimal berisi :max karakter.",
        "max.array" => ":Attribute maksimal terdiri dari :max anggota.",
        "between.numeric" => ":Attribute harus bernilai antara :min sampai :max.",
        "between.string" => ":Attribute harus berisi antara :min sampai :max karakter.",
        "between.array" => ":Attribute harus memiliki :min sampai :max anggota.",
        "size.numeric" => ":Attribute harus berukuran :size.",
        "size.string" => ":Attribute harus berukuran :size karakter.",
        "size.array" => ":Attribute harus mengandung :size anggota.",
        "in" | "not_in" => ":Attribute yang dipilih tidak valid.",
        "same" => ":Attribute dan :other harus sama.",
        "different" => ":Attribute dan :other harus berbeda.",
        "confirmed" => "Konfirmasi :attribute tidak cocok.",
        "password.letters" => ":Attribute harus mengandung setidaknya satu huruf.",
        "password.mixed" => {
            ":Attribute harus mengandung setidaknya satu huruf kapital dan satu huruf kecil."
        }
        "password.numbers" => ":Attribute harus mengandung setidaknya satu angka.",
        "password.symbols" => ":Attribute harus mengandung setidaknya satu simbol.",
        _ => return None,
    };
    Some(template)
}

/// Resolves templates and display names for one validation call.
///
/// Template priority: caller override for `<path>.<rule>`, then
/// `<pattern>.<rule>`, then `<key>` and `<rule>`; then the locale catalog,
/// the English catalog, and finally the locale's generic fallback.
#[derive(Debug, Clone, Copy)]
pub struct MessageResolver<'a> {
    overrides: &'a MessageOverrides,
    attributes: &'a AttributeNames,
    locale: Locale,
}

impl<'a> MessageResolver<'a> {
    pub fn new(overrides: &'a MessageOverrides, attributes: &'a AttributeNames, locale: Locale) -> Self {
        Self {
            overrides,
            attributes,
            locale,
        }
    }

    /// Pick the template for `rule` failing on the concrete `path` expanded
    /// from `pattern`. `key` is the catalog key (e.g. `min.string`).
    pub fn template(&self, path: &str, pattern: &str, rule: &str, key: &str) -> &'a str {
        let candidates = [
            format!("{path}.{rule}"),
            format!("{pattern}.{rule}"),
            key.to_string(),
            rule.to_string(),
        ];
        candidates
            .iter()
            .find_map(|candidate| self.overrides.get(candidate))
            .map(String::as_str)
            .or_else(|| catalog(self.locale, key))
            .or_else(|| catalog(Locale::En, key))
            .unwrap_or_else(|| fallback(self.locale))
    }

    /// Display name for a field: caller-supplied name for the path or its
    /// pattern, else the path with underscores turned into spaces.
    pub fn attribute(&self, path: &str, pattern: &str) -> String {
        self.attributes
            .get(path)
            .or_else(|| self.attributes.get(pattern))
            .cloned()
            .unwrap_or_else(|| path.replace('_', " "))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

/// Substitute `:attribute` (also `:Attribute` and `:ATTRIBUTE`) and the
/// rule parameters into `template`.
pub fn render(template: &str, attribute: &str, params: &[(&str, String)]) -> String {
    let mut replacements: Vec<(String, String)> = vec![
        (":attribute".to_string(), attribute.to_string()),
        (":Attribute".to_string(), capitalize(attribute)),
        (":ATTRIBUTE".to_string(), attribute.to_uppercase()),
    ];
    replacements.extend(
        params
            .iter()
            .map(|(name, value)| (format!(":{name}"), value.clone())),
    );
    // Longest placeholder first so `:min` never clobbers `:min_digits`.
    replacements.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    replacements
        .iter()
        .fold(template.to_string(), |text, (placeholder, value)| {
            text.replace(placeholder.as_str(), value)
        })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format a rule bound without a trailing `.0` for whole numbers.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
