//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment variable {name}: {message}")]
    Env { name: &'static str, message: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration.
///
/// Starts from defaults, layers the optional TOML file on top, then applies
/// process environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    load_config_with(path, |name| std::env::var(name).ok())
}

/// [`load_config`] with environment variables read through `lookup`.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match path {
        Some(path) => parse_file(path)?,
        None => ServiceConfig::default(),
    };
    let config = apply_env_overrides(config, lookup)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_file(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Apply environment overrides using `lookup` to read variables.
///
/// | Variable               | Field                               |
/// |------------------------|-------------------------------------|
/// | `APP_NAME`             | `app_name`                          |
/// | `LOG_LEVEL`            | `observability.log_level`           |
/// | `CACHE_TTL_SECONDS`    | `cache.ttl_secs`                    |
/// | `CORS_ALLOW_ORIGINS`   | `cors.allow_origins` (comma list)   |
/// | `BIND_ADDRESS`         | `listener.bind_address`             |
/// | `REQUEST_TIMEOUT_SECS` | `listener.request_timeout_secs`     |
/// | `MAX_BODY_BYTES`       | `listener.max_body_bytes`           |
/// | `METRICS_ENABLED`      | `observability.metrics_enabled`     |
/// | `METRICS_ADDRESS`      | `observability.metrics_address`     |
pub fn apply_env_overrides<F>(
    mut config: ServiceConfig,
    lookup: F,
) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("APP_NAME") {
        config.app_name = v;
    }
    if let Some(v) = lookup("LOG_LEVEL") {
        config.observability.log_level = v.to_ascii_lowercase();
    }
    if let Some(v) = lookup("CACHE_TTL_SECONDS") {
        config.cache.ttl_secs = parse_env("CACHE_TTL_SECONDS", &v)?;
    }
    if let Some(v) = lookup("CORS_ALLOW_ORIGINS") {
        config.cors.allow_origins = v
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();
    }
    if let Some(v) = lookup("BIND_ADDRESS") {
        config.listener.bind_address = v;
    }
    if let Some(v) = lookup("REQUEST_TIMEOUT_SECS") {
        config.listener.request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", &v)?;
    }
    if let Some(v) = lookup("MAX_BODY_BYTES") {
        config.listener.max_body_bytes = parse_env("MAX_BODY_BYTES", &v)?;
    }
    if let Some(v) = lookup("METRICS_ENABLED") {
        config.observability.metrics_enabled = parse_env("METRICS_ENABLED", &v)?;
    }
    if let Some(v) = lookup("METRICS_ADDRESS") {
        config.observability.metrics_address = v;
    }
    Ok(config)
}

fn parse_env<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Env {
        name,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let config = apply_env_overrides(ServiceConfig::default(), env(&[])).unwrap();
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.app_name, "ListService");
    }

    #[test]
    fn test_env_overrides() {
        let config = apply_env_overrides(
            ServiceConfig::default(),
            env(&[
                ("APP_NAME", "Lists"),
                ("LOG_LEVEL", "DEBUG"),
                ("CACHE_TTL_SECONDS", "300"),
                ("CORS_ALLOW_ORIGINS", "https://a.example, https://b.example"),
                ("METRICS_ENABLED", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.app_name, "Lists");
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(
            config.cors.allow_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(config.observability.metrics_enabled);
    }

    #[test]
    fn test_bad_integer_override() {
        let err = apply_env_overrides(
            ServiceConfig::default(),
            env(&[("CACHE_TTL_SECONDS", "sixty")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Env { name: "CACHE_TTL_SECONDS", .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[cache]\nttl_secs = 15").unwrap();

        let config = parse_file(file.path()).unwrap();
        assert_eq!(config.cache.ttl_secs, 15);
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "cache = [").unwrap();

        assert!(matches!(parse_file(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "app_name = \"FromFile\"\n\n[cache]\nttl_secs = 15\n\n[listener]\nrequest_timeout_secs = 10"
        )
        .unwrap();

        let config = load_config_with(
            Some(file.path()),
            env(&[("CACHE_TTL_SECONDS", "90"), ("CORS_ALLOW_ORIGINS", "https://a.example")]),
        )
        .unwrap();

        // File values survive where the environment is silent
        assert_eq!(config.app_name, "FromFile");
        assert_eq!(config.listener.request_timeout_secs, 10);
        // Environment wins where both are set
        assert_eq!(config.cache.ttl_secs, 90);
        assert_eq!(config.cors.allow_origins, vec!["https://a.example".to_string()]);
    }

    #[test]
    fn test_load_validates_after_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[listener]\nbind_address = \"127.0.0.1:8080\"").unwrap();

        let err = load_config_with(Some(file.path()), env(&[("BIND_ADDRESS", "nowhere")]))
            .unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "listener.bind_address");
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_with(Some(&dir.path().join("absent.toml")), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![ValidationError {
            field: "cache.ttl_secs",
            message: "bad".into(),
        }]);
        assert_eq!(err.to_string(), "Validation failed: cache.ttl_secs: bad");
    }
}
