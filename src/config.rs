//! Application configuration read from environment variables.

use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;

use crate::pagination::PaginationConfig;

/// The environment variable that selects the [Environment].
pub const APP_ENV_VAR: &str = "APP_ENV";
/// The environment variable that selects the [PaymentsEnvironment].
pub const PAYMENTS_ENV_VAR: &str = "PAYMENTS_ENV";
/// The environment variable that overrides [PaginationConfig::rows_per_page].
pub const ROWS_PER_PAGE_VAR: &str = "ROWS_PER_PAGE";

/// Errors that can occur while reading the configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("the environment variable '{0}' must be set")]
    MissingVariable(&'static str),

    /// The payments network environment is not one of the supported values.
    #[error("payments environment should either be set to `sandbox` or `production`, got \"{0}\"")]
    InvalidPaymentsEnvironment(String),

    /// The application environment is not one of the supported values.
    #[error("app environment should either be set to `development` or `production`, got \"{0}\"")]
    InvalidEnvironment(String),

    /// The rows per page setting is not a positive integer.
    #[error("rows per page must be a positive integer, got \"{0}\"")]
    InvalidRowsPerPage(String),
}

/// Where the application is running, controls the default log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development, logs at the `debug` level.
    #[default]
    Development,
    /// Production deployment, logs at the `info` level.
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => Err(ConfigError::InvalidEnvironment(other.to_owned())),
        }
    }
}

/// Which payments network environment transfers are sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentsEnvironment {
    /// The payments network's test environment, no real money moves.
    Sandbox,
    /// The live payments network.
    Production,
}

impl FromStr for PaymentsEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sandbox" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            other => Err(ConfigError::InvalidPaymentsEnvironment(other.to_owned())),
        }
    }
}

impl Display for PaymentsEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sandbox => write!(f, "sandbox"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// The application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where the application is running.
    pub environment: Environment,
    /// Which payments network environment to use.
    pub payments_environment: PaymentsEnvironment,
    /// How transaction history is split into pages.
    pub pagination: PaginationConfig,
}

impl Config {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [ConfigError] if `PAYMENTS_ENV` is missing or any variable
    /// has an unsupported value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration using `lookup` to resolve variable names.
    ///
    /// # Errors
    ///
    /// See [Config::from_env].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup(APP_ENV_VAR) {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };

        let payments_environment = lookup(PAYMENTS_ENV_VAR)
            .ok_or(ConfigError::MissingVariable(PAYMENTS_ENV_VAR))?
            .parse()?;

        let mut pagination = PaginationConfig::default();

        if let Some(value) = lookup(ROWS_PER_PAGE_VAR) {
            pagination.rows_per_page = match value.parse::<u64>() {
                Ok(rows) if rows > 0 => rows,
                _ => return Err(ConfigError::InvalidRowsPerPage(value)),
            };
        }

        Ok(Self {
            environment,
            payments_environment,
            pagination,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{Config, ConfigError, Environment, PaymentsEnvironment};

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        move |key| vars.get(key).cloned()
    }

    #[test]
    fn reads_all_variables() {
        let config = Config::from_lookup(lookup_from(&[
            ("APP_ENV", "production"),
            ("PAYMENTS_ENV", "sandbox"),
            ("ROWS_PER_PAGE", "25"),
        ]))
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.payments_environment, PaymentsEnvironment::Sandbox);
        assert_eq!(config.pagination.rows_per_page, 25);
    }

    #[test]
    fn defaults_to_development_and_ten_rows() {
        let config = Config::from_lookup(lookup_from(&[("PAYMENTS_ENV", "production")])).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.payments_environment, PaymentsEnvironment::Production);
        assert_eq!(config.pagination.rows_per_page, 10);
    }

    #[test]
    fn fails_without_payments_environment() {
        let result = Config::from_lookup(lookup_from(&[]));

        assert_eq!(result, Err(ConfigError::MissingVariable("PAYMENTS_ENV")));
    }

    #[test]
    fn fails_with_unknown_payments_environment() {
        let result = Config::from_lookup(lookup_from(&[("PAYMENTS_ENV", "staging")]));

        assert_eq!(
            result,
            Err(ConfigError::InvalidPaymentsEnvironment("staging".to_owned()))
        );
    }

    #[test]
    fn fails_with_unknown_app_environment() {
        let result = Config::from_lookup(lookup_from(&[
            ("APP_ENV", "test"),
            ("PAYMENTS_ENV", "sandbox"),
        ]));

        assert_eq!(
            result,
            Err(ConfigError::InvalidEnvironment("test".to_owned()))
        );
    }

    #[test]
    fn rejects_zero_rows_per_page() {
        let result = Config::from_lookup(lookup_from(&[
            ("PAYMENTS_ENV", "sandbox"),
            ("ROWS_PER_PAGE", "0"),
        ]));

        assert_eq!(result, Err(ConfigError::InvalidRowsPerPage("0".to_owned())));
    }
}
