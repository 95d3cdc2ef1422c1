use formgate_core::validation::Locale;
use rand::Rng;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Locale for validation messages (default: `en`).
    pub locale: Locale,
    /// Secret used to sign anti-forgery tokens.
    pub app_key: String,
    /// Lifetime of an anti-forgery token in seconds (default: `7200`).
    pub csrf_token_ttl_secs: i64,
    pub username_max_length: u32,
    pub password_min_length: u32,
    pub password_max_length: u32,
}

/// A configuration variable that is present but unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("PASSWORD_MIN_LENGTH ({min}) must not exceed PASSWORD_MAX_LENGTH ({max})")]
    PasswordBounds { min: u32, max: u32 },
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `APP_LOCALE`           | `en`                       |
    /// | `APP_KEY`              | random per process         |
    /// | `CSRF_TOKEN_TTL_SECS`  | `7200`                     |
    /// | `USERNAME_MAX_LENGTH`  | `100`                      |
    /// | `PASSWORD_MIN_LENGTH`  | `6`                        |
    /// | `PASSWORD_MAX_LENGTH`  | `20`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = parse_var(&lookup, "PORT", 3000, "a valid u16")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30, "a valid u64")?;

        let locale = match lookup("APP_LOCALE") {
            Some(tag) => tag.parse().map_err(|_| ConfigError::Invalid {
                var: "APP_LOCALE",
                expected: "one of: en, id",
                value: tag,
            })?,
            None => Locale::En,
        };

        let app_key = match lookup("APP_KEY").filter(|k| !k.is_empty()) {
            Some(key) => key,
            None => {
                tracing::warn!("APP_KEY not set, generating a per-process key; form tokens will not survive restarts");
                generate_app_key()
            }
        };

        let csrf_token_ttl_secs: i64 = parse_var(&lookup, "CSRF_TOKEN_TTL_SECS", 7200, "a positive integer")?;
        if csrf_token_ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                var: "CSRF_TOKEN_TTL_SECS",
                expected: "a positive integer",
                value: csrf_token_ttl_secs.to_string(),
            });
        }

        let username_max_length = parse_var(&lookup, "USERNAME_MAX_LENGTH", 100, "a positive integer")?;
        let password_min_length = parse_var(&lookup, "PASSWORD_MIN_LENGTH", 6, "a positive integer")?;
        let password_max_length = parse_var(&lookup, "PASSWORD_MAX_LENGTH", 20, "a positive integer")?;
        if password_min_length > password_max_length {
            return Err(ConfigError::PasswordBounds {
                min: password_min_length,
                max: password_max_length,
            });
        }

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            locale,
            app_key,
            csrf_token_ttl_secs,
            username_max_length,
            password_min_length,
            password_max_length,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value: raw,
        }),
        None => Ok(default),
    }
}

fn generate_app_key() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.app_key.len(), 64);
        assert_eq!(config.csrf_token_ttl_secs, 7200);
        assert_eq!(
            (config.username_max_length, config.password_min_length, config.password_max_length),
            (100, 6, 20)
        );
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("APP_LOCALE", "id"),
            ("APP_KEY", "secret"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.locale, Locale::Id);
        assert_eq!(config.app_key, "secret");
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn rejects_bad_values() {
        assert_matches!(load(&[("PORT", "eighty")]), Err(ConfigError::Invalid { var: "PORT", .. }));
        assert_matches!(
            load(&[("APP_LOCALE", "fr")]),
            Err(ConfigError::Invalid { var: "APP_LOCALE", .. })
        );
        assert_matches!(
            load(&[("CSRF_TOKEN_TTL_SECS", "0")]),
            Err(ConfigError::Invalid { var: "CSRF_TOKEN_TTL_SECS", .. })
        );
        assert_matches!(
            load(&[("PASSWORD_MIN_LENGTH", "30")]),
            Err(ConfigError::PasswordBounds { min: 30, max: 20 })
        );
    }
}
