use std::{fmt::Display, str::FromStr};

use service_providers::{
    logger::{DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL},
    LogFormat, LoggerOptions, MongoDbOptions, ParseLogFormatError,
};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Application identifier, reported to external services
pub const APP_ID: &str = "my-application";

const ENV_ENV: &str = "ENV";
const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
const ENV_MONGODB_URI: &str = "MONGODB_URI";
const ENV_BUCKET: &str = "STORAGE_BUCKET";

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    #[default]
    Local,
    Development,
    Staging,
    Production,
}
impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}
impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Environment::Local),
            "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(ParseEnvironmentError(other.to_string())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("environment \"{0}\" is not valid")]
pub struct ParseEnvironmentError(pub String);

/// Errors while reading the configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    Environment(#[from] ParseEnvironmentError),
    #[error(transparent)]
    LogFormat(#[from] ParseLogFormatError),
    #[error("log level \"{0}\" is not valid")]
    LogLevel(String),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: LevelFilter,
    pub log_format: LogFormat,
    pub mongodb: MongoDbOptions,
    /// Cloud storage bucket, required by the application services
    pub bucket: String,
}
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: Environment::default(),
            log_level: DEFAULT_LOG_LEVEL,
            log_format: DEFAULT_LOG_FORMAT,
            mongodb: MongoDbOptions::default().with_app_name(APP_ID),
            bucket: String::new(),
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment
    ///
    /// | variable | default |
    /// |---|---|
    /// | `ENV` | `local` |
    /// | `LOG_LEVEL` | `info` |
    /// | `LOG_FORMAT` | `text` |
    /// | `MONGODB_URI` | `mongodb://localhost:27017` |
    /// | `STORAGE_BUCKET` | none |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, unset and empty values keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut cfg = Self::default();

        if let Some(value) = read(ENV_ENV) {
            cfg.env = value.parse()?;
        }
        if let Some(value) = read(ENV_LOG_LEVEL) {
            cfg.log_level = value.parse().map_err(|_| ConfigError::LogLevel(value))?;
        }
        if let Some(value) = read(ENV_LOG_FORMAT) {
            cfg.log_format = value.parse()?;
        }
        if let Some(value) = read(ENV_MONGODB_URI) {
            cfg.mongodb.uri = value;
        }
        if let Some(value) = read(ENV_BUCKET) {
            cfg.bucket = value;
        }

        Ok(cfg)
    }

    pub fn logger_options(&self) -> LoggerOptions {
        LoggerOptions::new()
            .with_format(self.log_format)
            .with_level(self.log_level)
            .with_env(self.env.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use service_providers::database::DEFAULT_MONGODB_URI;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = load(&[]).unwrap();

        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.env, Environment::Local);
        assert_eq!(cfg.log_level, LevelFilter::INFO);
        assert_eq!(cfg.log_format, LogFormat::Text);
        assert_eq!(cfg.mongodb.uri, DEFAULT_MONGODB_URI);
        assert_eq!(cfg.mongodb.app_name.as_deref(), Some(APP_ID));
        assert!(cfg.bucket.is_empty());
    }

    #[test]
    fn reads_every_variable() {
        let cfg = load(&[
            ("ENV", "production"),
            ("LOG_LEVEL", "debug"),
            ("LOG_FORMAT", "json"),
            ("MONGODB_URI", "mongodb://db.internal:27017"),
            ("STORAGE_BUCKET", "assets"),
        ])
        .unwrap();

        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.log_level, LevelFilter::DEBUG);
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(cfg.mongodb.uri, "mongodb://db.internal:27017");
        assert_eq!(cfg.mongodb.app_name.as_deref(), Some(APP_ID));
        assert_eq!(cfg.bucket, "assets");
    }

    #[test]
    fn empty_values_keep_defaults() {
        let cfg = load(&[("ENV", ""), ("LOG_FORMAT", ""), ("STORAGE_BUCKET", "")]).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn unsupported_log_format() {
        let err = load(&[("LOG_FORMAT", "xml")]).unwrap_err();

        assert_eq!(err, ConfigError::LogFormat(ParseLogFormatError("xml".into())));
        assert_eq!(err.to_string(), r#"log format "xml" is not supported"#);
    }

    #[test]
    fn invalid_environment() {
        let err = load(&[("ENV", "Production")]).unwrap_err();
        assert_eq!(err.to_string(), r#"environment "Production" is not valid"#);
    }

    #[test]
    fn invalid_log_level() {
        let err = load(&[("LOG_LEVEL", "loud")]).unwrap_err();
        assert_eq!(err, ConfigError::LogLevel("loud".into()));
    }

    #[test]
    fn environments_round_trip_through_display() {
        for env in [
            Environment::Local,
            Environment::Development,
            Environment::Staging,
            Environment::Production,
        ] {
            assert_eq!(env.to_string().parse::<Environment>(), Ok(env));
        }
    }
}
