//! Logging setup and helpers for keeping secrets out of the logs.

use std::fmt::{Debug, Display};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Environment};

/// Text shown in place of redacted values.
pub const REDACTED: &str = "********";

/// Wraps a secret (password, access token, SSN) so that formatting it for a
/// log line prints [REDACTED] instead of the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Redacted<T>(pub T);

impl<T> Debug for Redacted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{REDACTED}")
    }
}

impl<T> Display for Redacted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{REDACTED}")
    }
}

/// The log filter used when `RUST_LOG` is not set.
pub fn default_filter(environment: Environment) -> &'static str {
    match environment {
        Environment::Production => "info",
        Environment::Development => "debug",
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the level implied by the configured
/// environment. Calling this more than once is a no-op.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config.environment)));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .try_init();

    if result.is_err() {
        tracing::debug!("tracing subscriber already initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::{Redacted, default_filter};
    use crate::config::Environment;

    #[test]
    fn redacts_debug_and_display() {
        let secret = Redacted("access-sandbox-123");

        assert_eq!(format!("{secret:?}"), "********");
        assert_eq!(format!("{secret}"), "********");
    }

    #[test]
    fn production_logs_less_than_development() {
        assert_eq!(default_filter(Environment::Production), "info");
        assert_eq!(default_filter(Environment::Development), "debug");
    }
}
